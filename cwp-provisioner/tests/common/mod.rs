//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use cwp_panel::{PanelClient, PanelCredentials};
use cwp_provisioner::types::OrderContext;
use cwp_provisioner::{CwpExtension, ExtensionHost};
use tokio::sync::RwLock;
use wiremock::{MockServer, Request};

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

/// 一个已关闭的本地端口地址（用于模拟传输失败）
pub fn unreachable_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// 解析收到的表单请求体
pub fn form_of(request: &Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

/// 模拟面板收到的全部请求（已解析为表单）
pub async fn received_forms(server: &MockServer) -> Vec<HashMap<String, String>> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(form_of)
        .collect()
}

// ===== RecordingHost =====

/// 记录所有宿主调用的 `ExtensionHost` 实现
#[derive(Default)]
pub struct RecordingHost {
    config: RwLock<HashMap<String, String>>,
    persisted: RwLock<Vec<(String, String, String)>>,
    errors: RwLock<Vec<(String, String)>>,
}

impl RecordingHost {
    pub fn with_panel(hostname: &str) -> Self {
        let config = HashMap::from([
            ("hostname".to_string(), hostname.to_string()),
            ("apiKey".to_string(), TEST_API_KEY.to_string()),
        ]);
        Self {
            config: RwLock::new(config),
            ..Self::default()
        }
    }

    pub async fn persisted(&self) -> Vec<(String, String, String)> {
        self.persisted.read().await.clone()
    }

    pub async fn errors(&self) -> Vec<(String, String)> {
        self.errors.read().await.clone()
    }
}

#[async_trait]
impl ExtensionHost for RecordingHost {
    async fn get_config(&self, _extension: &str, key: &str) -> Option<String> {
        self.config.read().await.get(key).cloned()
    }

    async fn set_order_product_config(&self, field: &str, value: &str, order_product_id: &str) {
        self.persisted.write().await.push((
            field.to_string(),
            value.to_string(),
            order_product_id.to_string(),
        ));
    }

    async fn report_error(&self, extension: &str, message: &str) {
        self.errors
            .write()
            .await
            .push((extension.to_string(), message.to_string()));
    }
}

/// 创建扩展实例，同时返回宿主以便断言
pub fn extension_with_host(hostname: &str) -> (CwpExtension, Arc<RecordingHost>) {
    let host = Arc::new(RecordingHost::with_panel(hostname));
    let client = PanelClient::new().expect("HTTP client builds");
    (CwpExtension::new(host.clone(), client), host)
}

/// 一个完整的订单上下文
pub fn test_order() -> OrderContext {
    OrderContext {
        order_product_id: "op-17".to_string(),
        owner_email: "owner@example.com".to_string(),
        params: HashMap::from([
            ("package".to_string(), "1".to_string()),
            ("inode".to_string(), "100".to_string()),
            ("limit_nproc".to_string(), "25".to_string()),
            ("limit_nofile".to_string(), "100".to_string()),
            ("server_ips".to_string(), "192.0.2.10".to_string()),
            ("autossl".to_string(), "1".to_string()),
            ("reseller".to_string(), "0".to_string()),
        ]),
        user_config: HashMap::from([
            ("domain".to_string(), "example.com".to_string()),
            ("password".to_string(), "s3cret".to_string()),
        ]),
        configurable_options: HashMap::new(),
    }
}

/// 已创建过账户的订单上下文
pub fn provisioned_order(username: &str) -> OrderContext {
    let mut order = test_order();
    order
        .user_config
        .insert("username".to_string(), username.to_string());
    order
}
