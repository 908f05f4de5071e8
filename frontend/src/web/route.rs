//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的所有路由及其守卫属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面（默认路由）
    #[default]
    Login,
    /// 统计面板（需要认证）
    Dashboard,
    /// 用户管理（需要认证）
    Usuarios,
    /// 档案管理（需要认证）
    Perfiles,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/usuarios" => Self::Usuarios,
            "/perfiles" => Self::Perfiles,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Dashboard => "/dashboard",
            Self::Usuarios => "/usuarios",
            Self::Perfiles => "/perfiles",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Usuarios | Self::Perfiles)
    }

    /// 已认证用户是否应该离开此路由（登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsea_las_rutas_conocidas() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/usuarios"), AppRoute::Usuarios);
        assert_eq!(AppRoute::from_path("/perfiles"), AppRoute::Perfiles);
        assert_eq!(AppRoute::from_path("/otra-cosa"), AppRoute::NotFound);
    }

    #[test]
    fn tolera_barra_final() {
        assert_eq!(AppRoute::from_path("/usuarios/"), AppRoute::Usuarios);
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
    }

    #[test]
    fn solo_las_pantallas_internas_exigen_autenticacion() {
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::Usuarios.requires_auth());
        assert!(AppRoute::Perfiles.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
    }

    #[test]
    fn redirecciones_de_autenticacion() {
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(!AppRoute::Dashboard.should_redirect_when_authenticated());
        assert_eq!(AppRoute::auth_failure_redirect(), AppRoute::Login);
        assert_eq!(AppRoute::auth_success_redirect(), AppRoute::Dashboard);
    }
}
