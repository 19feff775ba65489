//! 共享测试工具和辅助函数

#![allow(dead_code)]

use cwp_panel::PanelCredentials;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";

/// 初始化测试日志（重复调用无副作用）
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 启动一个模拟 CWP 面板
pub async fn start_panel() -> MockServer {
    init_logger();
    MockServer::start().await
}

/// 指向模拟面板的凭证
pub fn credentials_for(server: &MockServer) -> PanelCredentials {
    PanelCredentials::new(&server.uri(), TEST_API_KEY).expect("mock server uri is a valid URL")
}

/// 指向已关闭端口的凭证（用于模拟传输失败）
pub fn unreachable_credentials() -> PanelCredentials {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    PanelCredentials::new(&format!("http://127.0.0.1:{port}"), TEST_API_KEY)
        .expect("loopback URL is valid")
}
