//! 已认证页面的外壳
//!
//! 顶栏：品牌 + 导航链接 + 会话用户 + 注销。

use crate::auth::{logout, use_auth};
use crate::components::icons::LogOut;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;

#[component]
fn NavLink(ruta: AppRoute, etiqueta: &'static str) -> impl IntoView {
    let router = use_router();
    let activa = move || router.current_route().get() == ruta;

    view! {
        <li>
            <a
                class=move || if activa() { "active" } else { "" }
                on:click=move |_| router.navigate(ruta.to_path())
            >
                {etiqueta}
            </a>
        </li>
    }
}

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = use_auth();

    let username = move || {
        auth.state
            .get()
            .sesion
            .map(|sesion| sesion.username)
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        // 导航由路由服务的认证状态监听自动处理
        logout(&auth);
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-lg px-4">
                <div class="flex-1 gap-2">
                    <span class="btn btn-ghost text-xl">"Sistema de Gestión"</span>
                    <ul class="menu menu-horizontal px-1 gap-1">
                        <NavLink ruta=AppRoute::Dashboard etiqueta="Dashboard" />
                        <NavLink ruta=AppRoute::Usuarios etiqueta="Usuarios" />
                        <NavLink ruta=AppRoute::Perfiles etiqueta="Perfiles" />
                    </ul>
                </div>
                <div class="flex-none gap-2">
                    <span class="badge badge-neutral hidden md:inline-flex">{username}</span>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Cerrar Sesión"
                    </button>
                </div>
            </div>

            <main class="max-w-7xl mx-auto p-4 md:p-8">{children()}</main>
        </div>
    }
}
