//! 档案资源服务

use super::ApiClient;
use crate::error::ApiError;
use gestion_shared::{Pagina, Perfil, PerfilPayload};
use gloo_net::http::Request;

impl ApiClient {
    /// 分页列出档案
    pub async fn listar_perfiles(&self, page: u32, size: u32) -> Result<Pagina<Perfil>, ApiError> {
        let req = self
            .autorizar(Request::get(&self.url("/perfiles")))
            .query([("page", page.to_string()), ("size", size.to_string())])
            .build()?;
        self.ejecutar(req).await
    }

    /// 按搜索词分页查询档案
    pub async fn buscar_perfiles(
        &self,
        termino: &str,
        page: u32,
        size: u32,
    ) -> Result<Pagina<Perfil>, ApiError> {
        let req = self
            .autorizar(Request::get(&self.url("/perfiles/search")))
            .query([
                ("searchTerm", termino.to_string()),
                ("page", page.to_string()),
                ("size", size.to_string()),
            ])
            .build()?;
        self.ejecutar(req).await
    }

    #[allow(dead_code)]
    pub async fn perfil_por_id(&self, id: i64) -> Result<Perfil, ApiError> {
        let req = self
            .autorizar(Request::get(&self.url(&format!("/perfiles/{}", id))))
            .build()?;
        self.ejecutar(req).await
    }

    #[allow(dead_code)]
    pub async fn perfil_por_nombre(&self, nombre: &str) -> Result<Perfil, ApiError> {
        let req = self
            .autorizar(Request::get(
                &self.url(&format!("/perfiles/nombre/{}", nombre)),
            ))
            .build()?;
        self.ejecutar(req).await
    }

    /// 创建档案
    pub async fn crear_perfil(&self, payload: &PerfilPayload) -> Result<Perfil, ApiError> {
        let req = self
            .autorizar(Request::post(&self.url("/perfiles")))
            .json(payload)?;
        self.ejecutar(req).await
    }

    /// 更新档案
    pub async fn actualizar_perfil(
        &self,
        id: i64,
        payload: &PerfilPayload,
    ) -> Result<Perfil, ApiError> {
        let req = self
            .autorizar(Request::put(&self.url(&format!("/perfiles/{}", id))))
            .json(payload)?;
        self.ejecutar(req).await
    }

    /// 删除档案。ADMIN 档案在 UI 层就被拒绝，不会走到这里。
    pub async fn eliminar_perfil(&self, id: i64) -> Result<(), ApiError> {
        let req = self
            .autorizar(Request::delete(&self.url(&format!("/perfiles/{}", id))))
            .build()?;
        self.ejecutar_sin_cuerpo(req).await
    }
}
