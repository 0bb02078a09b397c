use core::fmt::Debug;

/// Errors surfaced to the caller of the dispatcher.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E: 'static + Debug> {
    /// The transport failed while the SETUP header was being read.
    SetupRead {
        #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
        source: E,
    },
}

/// Why a standard request was left for the stall fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reject {
    UnsupportedRecipient,
    UnsupportedFeature { feature: u16 },
    ControlEndpoint,
    EndpointDisabled { endpoint: u8 },
    ConfigurationOutOfRange { requested: u8, available: u8 },
    DeviceDescriptorMissing,
    DescriptorNotFound { value: u16, index: u16 },
    Detached,
}
