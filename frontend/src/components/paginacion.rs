//! 分页脚注
//!
//! 每页大小选择 + 范围标签 + 上一页/下一页。
//! 大小变化会把页码归零（规则在 `ListingState` 内）。

use crate::components::icons::{ChevronLeft, ChevronRight};
use crate::listing::{ListingState, TAMANOS_PAGINA, rango_mostrado};
use leptos::prelude::*;

#[component]
pub fn Paginacion(
    estado: ListingState,
    /// 过滤后的总条目数（`totalElements`）
    #[prop(into)]
    total: Signal<u64>,
) -> impl IntoView {
    let total_paginas = move || {
        let size = estado.size.get();
        let total = total.get();
        if size == 0 || total == 0 {
            1
        } else {
            total.div_ceil(u64::from(size))
        }
    };

    let etiqueta = move || match rango_mostrado(estado.page.get(), estado.size.get(), total.get()) {
        Some((desde, hasta)) => format!("{}–{} de {}", desde, hasta, total.get()),
        None => "0 de 0".to_string(),
    };

    view! {
        <div class="flex items-center justify-end gap-4 px-6 py-3 border-t border-base-300">
            <label class="flex items-center gap-2 text-sm">
                "Filas por página"
                <select
                    class="select select-bordered select-sm"
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                            estado.cambiar_tamano(size);
                        }
                    }
                >
                    {TAMANOS_PAGINA
                        .into_iter()
                        .map(|tamano| {
                            view! {
                                <option
                                    value=tamano.to_string()
                                    selected=move || estado.size.get() == tamano
                                >
                                    {tamano.to_string()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>

            <span class="text-sm text-base-content/70">{etiqueta}</span>

            <div class="join">
                <button
                    class="btn btn-sm btn-ghost join-item"
                    disabled=move || estado.page.get() == 0
                    on:click=move |_| {
                        let actual = estado.page.get();
                        if actual > 0 {
                            estado.ir_a_pagina(actual - 1);
                        }
                    }
                >
                    <ChevronLeft attr:class="h-4 w-4" />
                </button>
                <button
                    class="btn btn-sm btn-ghost join-item"
                    disabled=move || u64::from(estado.page.get()) + 1 >= total_paginas()
                    on:click=move |_| {
                        if u64::from(estado.page.get()) + 1 < total_paginas() {
                            estado.ir_a_pagina(estado.page.get() + 1);
                        }
                    }
                >
                    <ChevronRight attr:class="h-4 w-4" />
                </button>
            </div>
        </div>
    }
}
