//! 认证模块
//!
//! 管理会话状态，与路由系统解耦：路由服务只消费注入的
//! 认证/加载信号。应用启动时从持久化存储恢复一次会话；
//! 任何请求收到 401/403 都会走与 logout 相同的拆除路径。

use crate::api::{ApiClient, api_base_url};
use crate::error::ApiError;
use crate::session::SessionStore;
use gestion_shared::{LoginRequest, Sesion};
use leptos::prelude::*;
use std::sync::Arc;

/// 认证状态
///
/// 三个阶段：`loading → authenticated | unauthenticated`。
/// `api` 仅在认证成功后存在。
#[derive(Clone)]
pub struct AuthState {
    pub sesion: Option<Sesion>,
    pub api: Option<ApiClient>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            sesion: None,
            api: None,
            is_authenticated: false,
            // 启动时处于 loading，直到 init_auth 读完存储
            is_loading: true,
        }
    }
}

/// 认证上下文，通过 Context 在组件间共享
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 认证状态信号（用于路由守卫注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }

    /// 加载状态信号（loading 期间受保护路由渲染占位符而非重定向）
    pub fn is_loading_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_loading)
    }

    /// 当前 API 客户端信号
    pub fn api_signal(&self) -> Signal<Option<ApiClient>> {
        let state = self.state;
        Signal::derive(move || state.get().api)
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 构造 API 客户端
///
/// token 从存储读取（每个请求独立读取），401/403 钩子执行
/// 与 logout 相同的会话拆除，让路由服务自动重定向。
fn crear_cliente(set_state: WriteSignal<AuthState>) -> ApiClient {
    ApiClient::new(
        api_base_url(),
        Arc::new(SessionStore::token),
        Arc::new(move || {
            web_sys::console::log_1(&"[Auth] Session rejected by backend. Tearing down.".into());
            desmontar_sesion(set_state);
        }),
    )
}

fn desmontar_sesion(set_state: WriteSignal<AuthState>) {
    SessionStore::limpiar();
    set_state.update(|state| {
        state.sesion = None;
        state.api = None;
        state.is_authenticated = false;
        state.is_loading = false;
    });
}

/// 初始化认证状态：从存储恢复上次的会话
///
/// token 与用户记录必须同时存在才算已认证；
/// 只剩其一的半残状态直接清除。
pub fn init_auth(ctx: &AuthContext) {
    let set_state = ctx.set_state;
    let restaurada = match (SessionStore::cargar(), SessionStore::esta_autenticado()) {
        (Some(sesion), true) => Some(sesion),
        (None, false) => None,
        _ => {
            SessionStore::limpiar();
            None
        }
    };

    set_state.update(|state| {
        state.is_loading = false;
        if let Some(sesion) = restaurada {
            state.api = Some(crear_cliente(set_state));
            state.sesion = Some(sesion);
            state.is_authenticated = true;
        }
    });
}

/// 登录：验证凭据、持久化会话、填充内存状态
pub async fn login(ctx: &AuthContext, credenciales: LoginRequest) -> Result<(), ApiError> {
    let set_state = ctx.set_state;
    let api = crear_cliente(set_state);
    let sesion = api.iniciar_sesion(&credenciales).await?;

    if !SessionStore::guardar(&sesion) {
        return Err(ApiError::Network(
            "almacenamiento local no disponible".to_string(),
        ));
    }

    set_state.update(|state| {
        state.api = Some(api);
        state.sesion = Some(sesion);
        state.is_authenticated = true;
        state.is_loading = false;
    });
    Ok(())
}

/// 注销并清除持久化状态
///
/// 不需要手动导航：路由服务监听认证状态变化并自动重定向。
pub fn logout(ctx: &AuthContext) {
    desmontar_sesion(ctx.set_state);
}
