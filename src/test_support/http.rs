use httpmock::MockServer;

/// Starts a fresh `httpmock::MockServer`. Panics when the environment forbids binding a
/// local port, which callers catch to skip the test.
pub fn start_mock_server() -> MockServer {
    MockServer::start()
}
