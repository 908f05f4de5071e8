//! 路由服务模块 - 核心引擎
//!
//! 封装 web_sys 的 History API，所有对 window.history 的操作
//! 都集中在此模块。导航流程："请求 -> 验证(Guard) -> 处理 -> 加载"。
//!
//! 会话尚在恢复（loading）期间守卫不做重定向：外壳渲染阻塞
//! 占位符，避免刷新页面时登录页一闪而过。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；认证/加载信号由外部注入，
/// 与认证系统解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
    is_loading: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>, is_loading: Signal<bool>) -> Self {
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
            is_loading,
        }
    }

    /// 当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `use_push` - true 使用 pushState，false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let resuelto = self.aplicar_guardia(target_route);
        if resuelto != target_route {
            // 守卫改写了目标，重定向不应留下历史记录
            replace_history_state(resuelto.to_path());
        } else if use_push {
            push_history_state(resuelto.to_path());
        } else {
            replace_history_state(resuelto.to_path());
        }
        self.set_route.set(resuelto);
    }

    /// 守卫：把请求的路由映射为允许渲染的路由
    ///
    /// loading 期间原样放行（外壳渲染占位符，不重定向）。
    fn aplicar_guardia(&self, target_route: AppRoute) -> AppRoute {
        if self.is_loading.get_untracked() {
            return target_route;
        }
        let is_auth = self.is_authenticated.get_untracked();

        if target_route.requires_auth() && !is_auth {
            web_sys::console::log_1(&"[Router] Access denied. Redirecting to login.".into());
            return AppRoute::auth_failure_redirect();
        }
        if target_route.should_redirect_when_authenticated() && is_auth {
            return AppRoute::auth_success_redirect();
        }
        target_route
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let servicio = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            // popstate 也执行守卫逻辑
            let resuelto = servicio.aplicar_guardia(target_route);
            if resuelto != target_route {
                replace_history_state(resuelto.to_path());
            }
            servicio.set_route.set(resuelto);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时的自动重定向
    ///
    /// 登录 -> 离开登录页进入面板；注销/会话失效 -> 回到登录页。
    fn setup_auth_redirect(&self) {
        let servicio = *self;

        Effect::new(move |_| {
            let is_auth = servicio.is_authenticated.get();
            // 会话恢复完成时也要重新套用守卫
            if servicio.is_loading.get() {
                return;
            }
            let route = servicio.current_route.get_untracked();

            if is_auth && route.should_redirect_when_authenticated() {
                let redirect = AppRoute::auth_success_redirect();
                push_history_state(redirect.to_path());
                servicio.set_route.set(redirect);
                web_sys::console::log_1(
                    &"[Router] Auth state changed: logged in, redirecting to dashboard.".into(),
                );
            } else if !is_auth && route.requires_auth() {
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(redirect.to_path());
                servicio.set_route.set(redirect);
                web_sys::console::log_1(
                    &"[Router] Auth state changed: logged out, redirecting to login.".into(),
                );
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>, is_loading: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated, is_loading);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 会话恢复中信号
    is_loading: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated, is_loading);

    children()
}

/// 路由出口组件：根据当前路由状态渲染对应的视图
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
