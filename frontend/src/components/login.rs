use crate::auth::{login, use_auth};
use crate::components::icons::Lock;
use crate::components::toast::use_toast;
use crate::error::ApiError;
use gestion_shared::LoginRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if username.get().trim().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Ingrese usuario y contraseña".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let credenciales = LoginRequest {
            username: username.get().trim().to_string(),
            password: password.get(),
        };

        spawn_local(async move {
            match login(&auth, credenciales).await {
                Ok(()) => {
                    // 重定向由路由服务的认证监听处理
                    toast.exito("Inicio de sesión exitoso");
                }
                Err(ApiError::Unauthorized) => {
                    set_error_msg.set(Some("Credenciales inválidas".to_string()));
                }
                Err(error) => {
                    set_error_msg.set(Some(error.mensaje_o("Error al iniciar sesión")));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Lock attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Sistema de Gestión"</h1>
                        <p class="text-base-content/70">
                            "Ingrese sus credenciales para continuar"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Nombre de Usuario"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                placeholder="admin"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Contraseña"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Ingresando..." }.into_any()
                                } else {
                                    "Iniciar Sesión".into_any()
                                }}
                            </button>
                        </div>

                        <p class="text-center text-xs text-base-content/50 mt-4">
                            "Credenciales de prueba: admin / admin123"
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
