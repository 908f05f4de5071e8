//! 用户资源服务
//!
//! 方法名到 REST 调用的无状态映射：参数原样传递，
//! 不做重试，也不做表单层之外的校验。

use super::ApiClient;
use crate::error::ApiError;
use gestion_shared::{LoginRequest, Pagina, Sesion, Usuario, UsuarioPayload};
use gloo_net::http::Request;

impl ApiClient {
    /// 登录，POST /auth/signin
    ///
    /// 唯一不带 token 的调用：此时还没有会话。
    pub async fn iniciar_sesion(&self, credenciales: &LoginRequest) -> Result<Sesion, ApiError> {
        let req = Request::post(&self.url("/auth/signin")).json(credenciales)?;
        self.ejecutar(req).await
    }

    /// 分页列出用户
    pub async fn listar_usuarios(&self, page: u32, size: u32) -> Result<Pagina<Usuario>, ApiError> {
        let req = self
            .autorizar(Request::get(&self.url("/usuarios")))
            .query([("page", page.to_string()), ("size", size.to_string())])
            .build()?;
        self.ejecutar(req).await
    }

    /// 按搜索词分页查询用户
    pub async fn buscar_usuarios(
        &self,
        termino: &str,
        page: u32,
        size: u32,
    ) -> Result<Pagina<Usuario>, ApiError> {
        let req = self
            .autorizar(Request::get(&self.url("/usuarios/search")))
            .query([
                ("searchTerm", termino.to_string()),
                ("page", page.to_string()),
                ("size", size.to_string()),
            ])
            .build()?;
        self.ejecutar(req).await
    }

    /// 按档案名称过滤用户
    #[allow(dead_code)]
    pub async fn usuarios_por_perfil(
        &self,
        perfil: &str,
        page: u32,
        size: u32,
    ) -> Result<Pagina<Usuario>, ApiError> {
        let req = self
            .autorizar(Request::get(&self.url(&format!("/usuarios/perfil/{}", perfil))))
            .query([("page", page.to_string()), ("size", size.to_string())])
            .build()?;
        self.ejecutar(req).await
    }

    #[allow(dead_code)]
    pub async fn usuario_por_id(&self, id: i64) -> Result<Usuario, ApiError> {
        let req = self
            .autorizar(Request::get(&self.url(&format!("/usuarios/{}", id))))
            .build()?;
        self.ejecutar(req).await
    }

    #[allow(dead_code)]
    pub async fn usuario_por_username(&self, username: &str) -> Result<Usuario, ApiError> {
        let req = self
            .autorizar(Request::get(
                &self.url(&format!("/usuarios/username/{}", username)),
            ))
            .build()?;
        self.ejecutar(req).await
    }

    /// 创建用户
    pub async fn crear_usuario(&self, payload: &UsuarioPayload) -> Result<Usuario, ApiError> {
        let req = self
            .autorizar(Request::post(&self.url("/usuarios")))
            .json(payload)?;
        self.ejecutar(req).await
    }

    /// 更新用户（username 不变，由表单层保证）
    pub async fn actualizar_usuario(
        &self,
        id: i64,
        payload: &UsuarioPayload,
    ) -> Result<Usuario, ApiError> {
        let req = self
            .autorizar(Request::put(&self.url(&format!("/usuarios/{}", id))))
            .json(payload)?;
        self.ejecutar(req).await
    }

    /// 删除用户
    pub async fn eliminar_usuario(&self, id: i64) -> Result<(), ApiError> {
        let req = self
            .autorizar(Request::delete(&self.url(&format!("/usuarios/{}", id))))
            .build()?;
        self.ejecutar_sin_cuerpo(req).await
    }

    /// 切换激活状态，PATCH /usuarios/{id}/estado
    ///
    /// 响应体被忽略：有的后端版本返回更新后的用户，有的返回空。
    pub async fn cambiar_estado_usuario(&self, id: i64, activo: bool) -> Result<(), ApiError> {
        let req = self
            .autorizar(Request::patch(
                &self.url(&format!("/usuarios/{}/estado", id)),
            ))
            .query([("activo", activo.to_string())])
            .build()?;
        self.ejecutar_sin_cuerpo(req).await
    }

    /// 给用户分配档案（按 id 的显式边操作）
    pub async fn asignar_perfil(&self, usuario_id: i64, perfil_id: i64) -> Result<(), ApiError> {
        let req = self
            .autorizar(Request::post(&self.url(&format!(
                "/usuarios/{}/perfiles/{}",
                usuario_id, perfil_id
            ))))
            .build()?;
        self.ejecutar_sin_cuerpo(req).await
    }

    /// 移除用户的档案
    pub async fn remover_perfil(&self, usuario_id: i64, perfil_id: i64) -> Result<(), ApiError> {
        let req = self
            .autorizar(Request::delete(&self.url(&format!(
                "/usuarios/{}/perfiles/{}",
                usuario_id, perfil_id
            ))))
            .build()?;
        self.ejecutar_sin_cuerpo(req).await
    }
}
