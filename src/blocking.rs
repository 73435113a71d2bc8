//! Blocking Chaojiying client.
//!
//! Wraps the async [`crate::Chaojiying`] with a private single-threaded Tokio
//! runtime. Each call blocks the current thread for one round trip.
//!
//! Calling these methods from inside an async runtime panics; use the async
//! client there instead.

use crate::client::{Chaojiying as AsyncChaojiying, ChaojiyingBuilder};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::{RecognitionResult, ReportOutcome, UserInfo};
use tokio::runtime::Runtime;

/// Blocking Chaojiying recognition client.
///
/// # Example
/// ```ignore
/// let client = chaojiying::blocking::Chaojiying::new()?;
/// let info = client.user_info()?;
/// println!("balance: {}", info.point_balance);
/// ```
pub struct Chaojiying {
    inner: AsyncChaojiying,
    runtime: Runtime,
}

impl Chaojiying {
    /// Create a client seeded from the `CHAOJIYING_*` environment variables.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Create a client from an explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::from_async(AsyncChaojiying::with_config(config)?)
    }

    /// Build a blocking client from an async builder.
    pub fn from_builder(builder: ChaojiyingBuilder) -> Result<Self> {
        Self::from_async(builder.build()?)
    }

    fn from_async(inner: AsyncChaojiying) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { inner, runtime })
    }

    /// Current configuration.
    pub fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    /// See [`crate::Chaojiying::reconfigure`].
    pub fn reconfigure(&mut self, config: ClientConfig) -> Result<()> {
        self.inner.reconfigure(config)
    }

    /// See [`crate::Chaojiying::set_proxy`].
    pub fn set_proxy(&mut self, proxy: impl Into<String>) -> Result<()> {
        self.inner.set_proxy(proxy)
    }

    /// Set the per-request timeout, in seconds. Zero disables it.
    pub fn set_timeout(&mut self, secs: u64) -> Result<()> {
        self.inner.set_timeout(secs)
    }

    pub fn set_account(&mut self, account: impl Into<String>) {
        self.inner.set_account(account);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.inner.set_password(password);
    }

    pub fn set_password_hash(&mut self, hash: impl Into<String>) {
        self.inner.set_password_hash(hash);
    }

    pub fn set_software_id(&mut self, software_id: impl Into<String>) {
        self.inner.set_software_id(software_id);
    }

    /// Query the account's point balance.
    pub fn user_info(&self) -> Result<UserInfo> {
        self.runtime.block_on(self.inner.user_info())
    }

    /// Submit a base64-encoded image for recognition.
    pub fn identify_image(
        &self,
        code_type: u32,
        min_len: u32,
        image_base64: &str,
    ) -> Result<RecognitionResult> {
        self.runtime
            .block_on(self.inner.identify_image(code_type, min_len, image_base64))
    }

    /// Submit raw image bytes for recognition.
    pub fn identify_image_bytes(
        &self,
        code_type: u32,
        min_len: u32,
        image: &[u8],
    ) -> Result<RecognitionResult> {
        self.runtime
            .block_on(self.inner.identify_image_bytes(code_type, min_len, image))
    }

    /// Report a wrong answer so the points for `task_id` are refunded.
    pub fn report_error(&self, task_id: &str) -> Result<ReportOutcome> {
        self.runtime.block_on(self.inner.report_error(task_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChaojiyingError;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Host the stub on its own runtime so the test thread is free to block.
    fn start_server(mocks: Vec<Mock>) -> (Runtime, MockServer) {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            for mock in mocks {
                mock.mount(&server).await;
            }
            server
        });
        (runtime, server)
    }

    fn test_config(server: &MockServer) -> ClientConfig {
        ClientConfig {
            account: "u1".into(),
            password: "p1".into(),
            software_id: "s1".into(),
            base_url: server.uri(),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_blocking_identify_then_report() {
        let (_runtime, server) = start_server(vec![
            Mock::given(method("POST"))
                .and(path("/Upload/Processing.php"))
                .respond_with(ResponseTemplate::new(200).set_body_string(
                    r#"{"err_no":0,"err_str":"","pic_id":"123","pic_str":"ab12","md5":"deadbeef"}"#,
                )),
            Mock::given(method("POST"))
                .and(path("/Upload/ReportError.php"))
                .and(body_string_contains("id=123"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_string(r#"{"err_no":0,"err_str":""}"#),
                ),
        ]);

        let client = Chaojiying::with_config(test_config(&server)).unwrap();

        let result = client.identify_image(1004, 4, "aGVsbG8=").unwrap();
        assert_eq!(result.recognized_text, "ab12");

        let outcome = client.report_error(&result.task_id).unwrap();
        assert_eq!(outcome.error_code, 0);
    }

    #[test]
    fn test_blocking_service_error() {
        let (_runtime, server) = start_server(vec![Mock::given(method("POST"))
            .and(path("/Upload/GetScore.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"err_no":-1002,"err_str":"用户名或密码错误"}"#),
            )]);

        let client = Chaojiying::with_config(test_config(&server)).unwrap();
        let err = client.user_info().unwrap_err();

        assert!(matches!(err, ChaojiyingError::Service { code: -1002, .. }));
        assert_eq!(err.to_string(), "用户名或密码错误");
    }

    #[test]
    fn test_blocking_timeout() {
        let (_runtime, server) = start_server(vec![Mock::given(method("POST")).respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"err_no":0,"err_str":""}"#)
                .set_delay(Duration::from_secs(5)),
        )]);

        let mut client = Chaojiying::with_config(test_config(&server)).unwrap();
        client.set_timeout(1).unwrap();

        let err = client.report_error("123").unwrap_err();
        assert!(err.is_timeout());
    }
}
