//! Reply channel back to the host

use wearm_protocol::Response;

/// Line-oriented reply sink
///
/// Implementations render the response and append the line terminator.
/// Transmit errors are the implementation's concern; replies are
/// best-effort.
#[allow(async_fn_in_trait)]
pub trait Console {
    async fn send(&mut self, response: Response<'_>);
}
