//! 列表资源模式
//!
//! Usuarios 与 Perfiles 两个页面重复的组合，抽取为一处：
//! 分页 + 搜索的查询状态、按查询键驱动的获取、
//! 旧数据保留（获取中不清空表格）、以及过期响应抑制。
//!
//! 排序保证：同一个列表在任意时刻只有一个"在途"获取有效；
//! 更新的请求使旧请求作废，旧请求迟到的结果被丢弃，
//! 否则翻页后可能闪回过期数据。

use crate::api::ApiClient;
use crate::error::ApiError;
use gestion_shared::Pagina;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 页面提供的每页大小选项
pub const TAMANOS_PAGINA: [u32; 3] = [5, 10, 25];

/// 默认每页大小
pub const TAMANO_DEFECTO: u32 = 10;

// =========================================================
// 查询键 (Listing key)
// =========================================================

/// 一次列表获取的查询键：(页码, 每页大小, 搜索词)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// 页码，从 0 开始
    pub page: u32,
    pub size: u32,
    pub termino: String,
}

impl ListingQuery {
    /// 搜索词非空时走搜索端点，否则走普通列表端点
    pub fn usa_busqueda(&self) -> bool {
        !self.termino.trim().is_empty()
    }
}

/// 分页脚注的 "Mostrando X–Y de Z"（1 起始，闭区间）
pub fn rango_mostrado(page: u32, size: u32, total: u64) -> Option<(u64, u64)> {
    if total == 0 || size == 0 {
        return None;
    }
    let desde = u64::from(page) * u64::from(size) + 1;
    if desde > total {
        return None;
    }
    let hasta = (desde + u64::from(size) - 1).min(total);
    Some((desde, hasta))
}

// =========================================================
// 过期响应抑制 (Stale-response suppression)
// =========================================================

/// 每个列表一个的代数计数器
///
/// 发起获取前 `avanzar()` 取得本次代数；结果返回后只有
/// `es_actual()` 仍成立才允许写入，否则该结果已被更新的
/// 请求取代。
#[derive(Clone, Default)]
pub struct StaleGuard(Arc<AtomicU64>);

impl StaleGuard {
    /// 开启新一代，作废所有在途请求
    pub fn avanzar(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 该代数是否仍是最新
    pub fn es_actual(&self, generacion: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generacion
    }
}

// =========================================================
// 查询状态 (signals)
// =========================================================

/// 列表查询状态
///
/// 整合为结构体（全部 `RwSignal`，实现 Copy，便于作为 Props 传递）。
/// 规则：搜索词或每页大小变化时页码归零。
#[derive(Clone, Copy)]
pub struct ListingState {
    pub page: RwSignal<u32>,
    pub size: RwSignal<u32>,
    pub termino: RwSignal<String>,
    refresco: RwSignal<u64>,
}

impl ListingState {
    pub fn new() -> Self {
        Self {
            page: RwSignal::new(0),
            size: RwSignal::new(TAMANO_DEFECTO),
            termino: RwSignal::new(String::new()),
            refresco: RwSignal::new(0),
        }
    }

    /// 当前查询键（响应式读取）
    pub fn query(&self) -> ListingQuery {
        ListingQuery {
            page: self.page.get(),
            size: self.size.get(),
            termino: self.termino.get(),
        }
    }

    pub fn ir_a_pagina(&self, page: u32) {
        self.page.set(page);
    }

    pub fn cambiar_tamano(&self, size: u32) {
        self.size.set(size);
        self.page.set(0);
    }

    pub fn cambiar_termino(&self, termino: String) {
        self.termino.set(termino);
        self.page.set(0);
    }

    /// 请求一次重新获取（突变成功后调用，正好一次）
    pub fn refrescar(&self) {
        self.refresco.update(|v| *v += 1);
    }

    fn version_refresco(&self) -> u64 {
        self.refresco.get()
    }
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================
// 获取驱动
// =========================================================

/// 一个已接线的列表资源
pub struct ListingHandle<T: Send + Sync + 'static> {
    pub estado: ListingState,
    /// 最近一次成功结算的页；获取中保留旧值，避免表格闪烁
    pub datos: ReadSignal<Option<Pagina<T>>>,
    pub cargando: ReadSignal<bool>,
}

// 手写 Copy：signal 句柄无条件可复制，不要求 T: Copy
impl<T: Send + Sync + 'static> Clone for ListingHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListingHandle<T> {}

/// 挂载列表获取：查询键或刷新版本变化即发起新获取
///
/// 失败时不清空已有数据，错误交给 `al_fallar`（通知通道）。
pub fn use_listing<T, F, Fut>(
    api: Signal<Option<ApiClient>>,
    al_fallar: impl Fn(ApiError) + Clone + 'static,
    consultar: F,
) -> ListingHandle<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(ApiClient, ListingQuery) -> Fut + Clone + 'static,
    Fut: Future<Output = Result<Pagina<T>, ApiError>> + 'static,
{
    let estado = ListingState::new();
    let (datos, set_datos) = signal(Option::<Pagina<T>>::None);
    let (cargando, set_cargando) = signal(false);
    let guardia = StaleGuard::default();

    Effect::new(move |_| {
        let consulta = estado.query();
        estado.version_refresco();
        let Some(cliente) = api.get() else {
            return;
        };

        let generacion = guardia.avanzar();
        set_cargando.set(true);

        let guardia = guardia.clone();
        let consultar = consultar.clone();
        let al_fallar = al_fallar.clone();
        spawn_local(async move {
            let resultado = consultar(cliente, consulta).await;
            // 迟到的过期响应直接丢弃
            if !guardia.es_actual(generacion) {
                return;
            }
            set_cargando.set(false);
            match resultado {
                Ok(pagina) => set_datos.set(Some(pagina)),
                // 认证失败已触发会话拆除与重定向，不再额外通知
                Err(error) if error.es_auth() => {}
                Err(error) => al_fallar(error),
            }
        });
    });

    ListingHandle {
        estado,
        datos,
        cargando,
    }
}

#[cfg(test)]
mod tests;
