//! HTTP 客户端封装
//!
//! 单一配置好的客户端：为每个请求附加 Bearer token，
//! 任何请求收到 401/403 时触发会话拆除钩子。
//! token 提供者与拆除钩子都是构造参数，便于在测试中替换。

use crate::error::ApiError;
use futures::future::{Either, select};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use std::sync::Arc;

mod perfiles;
mod usuarios;

/// 请求超时（毫秒）。超时按一般网络错误上报。
const TIEMPO_LIMITE_MS: u32 = 15_000;

/// 编译期注入的后端根路径
pub fn api_base_url() -> String {
    option_env!("GESTION_API_URL").unwrap_or("/api").to_string()
}

/// 返回当前会话 token 的提供者（无会话时为 None）
pub type TokenProvider = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// 认证失败时的会话拆除钩子
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: TokenProvider,
    al_no_autorizado: UnauthorizedHook,
}

impl ApiClient {
    pub fn new(base_url: String, token: TokenProvider, al_no_autorizado: UnauthorizedHook) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            al_no_autorizado,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    // 认证头：会话存在时附加 Bearer token
    fn autorizar(&self, req: RequestBuilder) -> RequestBuilder {
        match (self.token)() {
            Some(token) => req.header("Authorization", &format!("Bearer {}", token)),
            None => req,
        }
    }

    /// 发送请求并完成状态检查
    ///
    /// - 超时：按一般网络错误上报
    /// - 401/403：先触发会话拆除钩子，再返回 `Unauthorized`
    /// - 其余非 2xx：尽量解析后端错误体取 message
    async fn enviar(&self, req: Request) -> Result<Response, ApiError> {
        let envio = Box::pin(req.send());
        let limite = Box::pin(TimeoutFuture::new(TIEMPO_LIMITE_MS));

        let res = match select(envio, limite).await {
            Either::Left((res, _)) => res.map_err(ApiError::from)?,
            Either::Right(_) => {
                return Err(ApiError::Network("tiempo de espera agotado".to_string()));
            }
        };

        match res.status() {
            401 | 403 => {
                (self.al_no_autorizado)();
                Err(ApiError::Unauthorized)
            }
            _ if !res.ok() => {
                let cuerpo = res.text().await.unwrap_or_default();
                Err(ApiError::from_status_body(res.status(), &cuerpo))
            }
            _ => Ok(res),
        }
    }

    /// 发送请求并把响应体解码为 `T`
    async fn ejecutar<T: DeserializeOwned>(&self, req: Request) -> Result<T, ApiError> {
        let res = self.enviar(req).await?;
        res.json::<T>().await.map_err(ApiError::from)
    }

    /// 发送请求，忽略响应体（void 或调用方不关心的返回）
    async fn ejecutar_sin_cuerpo(&self, req: Request) -> Result<(), ApiError> {
        self.enviar(req).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cliente(base: &str) -> ApiClient {
        ApiClient::new(base.to_string(), Arc::new(|| None), Arc::new(|| {}))
    }

    #[test]
    fn recorta_barra_final_de_base_url() {
        let api = cliente("http://localhost:8080/api/");
        assert_eq!(api.url("/usuarios"), "http://localhost:8080/api/usuarios");
    }

    #[test]
    fn une_rutas_sin_barra_inicial() {
        let api = cliente("/api");
        assert_eq!(api.url("perfiles"), "/api/perfiles");
        assert_eq!(api.url("/perfiles"), "/api/perfiles");
    }
}
