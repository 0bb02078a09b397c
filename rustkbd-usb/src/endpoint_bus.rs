use core::fmt::Debug;

/// Number of the default control endpoint.
pub const CONTROL_ENDPOINT: u8 = 0;

/// Low-level access to the device controller's endpoints.
///
/// The controller exposes a single endpoint-selection register: `is_stalled`, `is_enabled`,
/// `stall`, `clear_stall` and `reset_data_toggle` act on whichever endpoint was selected last.
/// Anything that selects another endpoint must select [`CONTROL_ENDPOINT`] again before returning.
pub trait EndpointBus {
    type Error: Debug;

    /// Next byte of the pending SETUP packet.
    fn read_setup_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Queues a byte into the IN bank of the selected endpoint.
    fn write_byte(&mut self, byte: u8);

    fn write_word_le(&mut self, word: u16) {
        for byte in word.to_le_bytes() {
            self.write_byte(byte);
        }
    }

    /// Sends `bytes` as the data stage of a control read, split into as many packets as
    /// needed and cut off at `requested_len`, the length the host asked for.
    fn write_control_stream<I: Iterator<Item = u8>>(&mut self, bytes: I, requested_len: u16);

    /// Acknowledges the SETUP packet, releasing the bank it was received in.
    fn ack_setup(&mut self);

    /// Completes the status stage opposite to the data direction of the current request.
    fn ack_status_stage(&mut self);

    /// Sends the IN bank filled so far.
    fn ack_in(&mut self);

    /// Releases the OUT bank, which completes the status stage of a control read.
    fn ack_out(&mut self);

    fn is_in_ready(&self) -> bool;

    fn is_setup_pending(&self) -> bool;

    fn is_stalled(&self) -> bool;

    fn is_enabled(&self) -> bool;

    fn select_endpoint(&mut self, endpoint: u8);

    /// Answers the next transaction on the selected endpoint with STALL.
    fn stall(&mut self);

    fn clear_stall(&mut self);

    fn reset_fifo(&mut self, endpoint: u8);

    fn reset_data_toggle(&mut self);

    /// Writes the device address register and enables address recognition.
    fn set_address(&mut self, address: u8);
}
