//! 用户管理控制台前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎，含认证守卫）
//! - `auth` / `session`: 会话状态与持久化
//! - `api`: 带 Bearer token 的 HTTP 客户端与资源服务
//! - `listing`: 两个管理页面共用的列表资源模式
//! - `components`: UI 组件层

mod api;
mod auth;
mod error;
mod listing;
mod session;
mod validacion;

mod components {
    mod confirm_dialog;
    pub mod dashboard;
    mod icons;
    pub mod layout;
    pub mod login;
    mod paginacion;
    mod perfil_dialog;
    pub mod perfiles;
    pub mod toast;
    mod usuario_dialog;
    pub mod usuarios;
}

// 原生 Web API 封装模块（History 路由）
pub(crate) mod web {
    pub mod route;
    pub mod router;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::layout::AppShell;
use crate::components::login::LoginPage;
use crate::components::perfiles::PerfilesPage;
use crate::components::toast::{ToastContext, ToastHost};
use crate::components::usuarios::UsuariosPage;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 受保护的页面包在已认证外壳（导航栏 + 注销）里。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! {
            <AppShell>
                <DashboardPage />
            </AppShell>
        }
        .into_any(),
        AppRoute::Usuarios => view! {
            <AppShell>
                <UsuariosPage />
            </AppShell>
        }
        .into_any(),
        AppRoute::Perfiles => view! {
            <AppShell>
                <PerfilesPage />
            </AppShell>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página no encontrada"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证与通知上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    provide_context(ToastContext::new());

    // 2. 从 LocalStorage 恢复上次的会话
    init_auth(&auth_ctx);

    // 3. 把认证/加载信号注入路由服务（解耦）
    let is_authenticated = auth_ctx.is_authenticated_signal();
    let is_loading = auth_ctx.is_loading_signal();

    view! {
        <div data-theme="dark">
            <ToastHost />
            <Router is_authenticated=is_authenticated is_loading=is_loading>
                // 会话恢复期间渲染阻塞占位符，避免登录页一闪而过
                <Show
                    when=move || !is_loading.get()
                    fallback=|| view! {
                        <div class="flex items-center justify-center min-h-screen bg-base-200">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                >
                    <RouterOutlet matcher=route_matcher />
                </Show>
            </Router>
        </div>
    }
}
