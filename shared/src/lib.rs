use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 受保护的系统内置档案名称
///
/// 该档案不可删除，名称不可修改。前端在发起请求之前就拒绝
/// 这类操作；后端同样将其视为权威约束。
pub const PERFIL_ADMIN: &str = "ADMIN";

/// 判断档案名称是否受系统保护（精确匹配，区分大小写）
pub fn es_perfil_protegido(nombre: &str) -> bool {
    nombre == PERFIL_ADMIN
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户账号
///
/// `perfiles` 保存档案名称集合，仅用于展示；
/// 成员关系的增删通过独立的边操作按 id 提交。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub nombre: String,
    #[serde(default)]
    pub apellidos: Option<String>,
    pub activo: bool,
    #[serde(default)]
    pub perfiles: Vec<String>,
    #[serde(default)]
    pub fecha_creacion: Option<NaiveDateTime>,
}

impl Usuario {
    /// 展示用全名（姓氏可能为空）
    pub fn nombre_completo(&self) -> String {
        match self.apellidos.as_deref() {
            Some(apellidos) if !apellidos.trim().is_empty() => {
                format!("{} {}", self.nombre, apellidos)
            }
            _ => self.nombre.clone(),
        }
    }
}

/// 角色档案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perfil {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub fecha_creacion: Option<NaiveDateTime>,
    #[serde(default)]
    pub fecha_modificacion: Option<NaiveDateTime>,
}

impl Perfil {
    /// 该档案是否受保护（不可删除、名称不可编辑）
    pub fn es_protegido(&self) -> bool {
        es_perfil_protegido(&self.nombre)
    }
}

// =========================================================
// 分页 (Pagination)
// =========================================================

/// 分页结果
///
/// 兼容 Spring Data 的页对象：页码字段后端序列化为 `number`，
/// 这里通过 alias 同时接受 `page` 与 `number`。
/// 不变式：`content.len() <= size`；`total_elements` 为过滤后
/// 的全集大小，而非当前页大小。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagina<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    #[serde(alias = "number", default)]
    pub page: u32,
    pub size: u32,
}

impl<T> Pagina<T> {
    /// 总页数，至少为 1（空结果时分页控件仍显示 1 页）
    pub fn total_paginas(&self) -> u64 {
        if self.size == 0 || self.total_elements == 0 {
            return 1;
        }
        self.total_elements.div_ceil(self.size as u64)
    }

    /// 当前页是否为最后一页
    pub fn es_ultima(&self) -> bool {
        u64::from(self.page) + 1 >= self.total_paginas()
    }

    pub fn vacia(&self) -> bool {
        self.content.is_empty()
    }
}

// =========================================================
// 认证 (Authentication)
// =========================================================

/// 登录请求体，对应 POST /auth/signin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 登录成功后返回的会话记录（token + 用户信息）
///
/// 整条记录持久化到浏览器存储，作为已认证身份的唯一凭据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sesion {
    pub token: String,
    #[serde(default)]
    pub tipo: Option<String>,
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub perfiles: Vec<String>,
}

// =========================================================
// 请求载荷 (Mutation Payloads)
// =========================================================

/// 创建/更新用户的请求体
///
/// `password` 仅在创建时携带；更新时序列化器直接省略该字段。
/// 档案成员关系不在此载荷内（见 Usuario 文档）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioPayload {
    pub username: String,
    pub email: String,
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apellidos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub activo: bool,
}

/// 创建/更新档案的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfilPayload {
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

// =========================================================
// 错误载荷 (Error Payload)
// =========================================================

/// 后端返回的结构化错误体
///
/// 字段全部可选：不同失败路径（Spring 默认错误页、业务异常）
/// 给出的形状不完全一致，能取到 message 就取。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// 取出人类可读的错误消息（message 优先于 error）
    pub fn mensaje(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error.as_deref().filter(|m| !m.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfil_protegido_es_coincidencia_exacta() {
        assert!(es_perfil_protegido("ADMIN"));
        assert!(!es_perfil_protegido("admin"));
        assert!(!es_perfil_protegido("ADMINISTRADOR"));
        assert!(!es_perfil_protegido(" ADMIN"));
    }

    #[test]
    fn pagina_acepta_forma_de_spring() {
        // Spring serializes the page index as "number"
        let json = r#"{
            "content": [],
            "totalElements": 42,
            "number": 3,
            "size": 10
        }"#;
        let pagina: Pagina<Usuario> = serde_json::from_str(json).unwrap();
        assert_eq!(pagina.page, 3);
        assert_eq!(pagina.total_elements, 42);
        assert_eq!(pagina.size, 10);
    }

    #[test]
    fn total_paginas_redondea_hacia_arriba() {
        let pagina = Pagina::<Perfil> {
            content: Vec::new(),
            total_elements: 25,
            page: 0,
            size: 10,
        };
        assert_eq!(pagina.total_paginas(), 3);

        let exacta = Pagina::<Perfil> {
            total_elements: 30,
            ..pagina.clone()
        };
        assert_eq!(exacta.total_paginas(), 3);
    }

    #[test]
    fn total_paginas_nunca_es_cero() {
        let vacia = Pagina::<Usuario> {
            content: Vec::new(),
            total_elements: 0,
            page: 0,
            size: 10,
        };
        assert_eq!(vacia.total_paginas(), 1);
        assert!(vacia.es_ultima());

        let sin_tamano = Pagina::<Usuario> {
            size: 0,
            ..vacia
        };
        assert_eq!(sin_tamano.total_paginas(), 1);
    }

    #[test]
    fn usuario_tolera_campos_ausentes() {
        let json = r#"{
            "id": 7,
            "username": "jdoe",
            "email": "jdoe@example.com",
            "nombre": "John",
            "activo": true
        }"#;
        let usuario: Usuario = serde_json::from_str(json).unwrap();
        assert!(usuario.perfiles.is_empty());
        assert_eq!(usuario.apellidos, None);
        assert_eq!(usuario.nombre_completo(), "John");
    }

    #[test]
    fn nombre_completo_incluye_apellidos() {
        let usuario = Usuario {
            id: 1,
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            nombre: "John".into(),
            apellidos: Some("Doe".into()),
            activo: true,
            perfiles: vec!["USER".into()],
            fecha_creacion: None,
        };
        assert_eq!(usuario.nombre_completo(), "John Doe");
    }

    #[test]
    fn payload_omite_password_ausente() {
        let payload = UsuarioPayload {
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            nombre: "John".into(),
            apellidos: None,
            password: None,
            activo: true,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("apellidos"));

        let con_password = UsuarioPayload {
            password: Some("secreto1".into()),
            ..payload
        };
        let json = serde_json::to_string(&con_password).unwrap();
        assert!(json.contains("\"password\":\"secreto1\""));
    }

    #[test]
    fn sesion_conserva_el_token() {
        let json = r#"{
            "token": "abc.def.ghi",
            "tipo": "Bearer",
            "id": 1,
            "username": "admin",
            "email": "admin@example.com",
            "perfiles": ["ADMIN"]
        }"#;
        let sesion: Sesion = serde_json::from_str(json).unwrap();
        assert_eq!(sesion.token, "abc.def.ghi");
        assert_eq!(sesion.perfiles, vec!["ADMIN".to_string()]);
    }

    #[test]
    fn error_response_prefiere_message() {
        let cuerpo: ErrorResponse =
            serde_json::from_str(r#"{"message": "Ya existe", "error": "Conflict"}"#).unwrap();
        assert_eq!(cuerpo.mensaje(), Some("Ya existe"));

        let solo_error: ErrorResponse =
            serde_json::from_str(r#"{"error": "Forbidden", "status": 403}"#).unwrap();
        assert_eq!(solo_error.mensaje(), Some("Forbidden"));

        let vacio: ErrorResponse = serde_json::from_str(r#"{"message": "  "}"#).unwrap();
        assert_eq!(vacio.mensaje(), None);
    }
}
