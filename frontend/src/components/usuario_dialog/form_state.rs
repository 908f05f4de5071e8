//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有与重置
//! - 编辑模式下用选中实体预填
//! - 校验（在任何网络调用之前）与到请求对象的转换
//!
//! 档案成员关系按 id 集合编辑；提交时由页面计算差集，
//! 以显式的分配/移除边操作发给后端，而不是整集合提交。

use crate::validacion;
use gestion_shared::{Perfil, Usuario, UsuarioPayload};
use leptos::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// 表单字段快照（纯数据，便于校验与测试）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatosUsuario {
    pub username: String,
    pub email: String,
    pub nombre: String,
    pub apellidos: String,
    pub password: String,
    pub activo: bool,
}

/// 页面收到的提交请求
#[derive(Debug, Clone, PartialEq)]
pub struct SolicitudUsuario {
    /// None => 创建，Some => 更新
    pub id: Option<i64>,
    pub payload: UsuarioPayload,
    /// 表单中勾选的档案 id 集合
    pub perfiles_deseados: BTreeSet<i64>,
    /// 打开表单时该用户已有的档案 id 集合
    pub perfiles_actuales: BTreeSet<i64>,
}

// =========================================================
// 纯逻辑
// =========================================================

/// 字段校验；返回 campo -> 错误文案
///
/// username 与 password 仅在创建时校验：编辑模式下
/// username 字段被禁用，password 不出现在表单里。
pub fn validar_usuario(datos: &DatosUsuario, es_edicion: bool) -> HashMap<&'static str, String> {
    let mut errores = HashMap::new();

    if !es_edicion {
        if let Some(error) = validacion::requerido(&datos.username, "Username es requerido")
            .or_else(|| validacion::longitud_entre(&datos.username, 3, 50))
        {
            errores.insert("username", error);
        }
        if let Some(error) = validacion::requerido(&datos.password, "Contraseña es requerida")
            .or_else(|| validacion::longitud_entre(&datos.password, 6, 100))
        {
            errores.insert("password", error);
        }
    }

    if let Some(error) = validacion::requerido(&datos.email, "Email es requerido")
        .or_else(|| validacion::email_valido(&datos.email))
    {
        errores.insert("email", error);
    }
    if let Some(error) = validacion::requerido(&datos.nombre, "Nombre es requerido")
        .or_else(|| validacion::longitud_maxima(&datos.nombre, 100))
    {
        errores.insert("nombre", error);
    }
    if let Some(error) = validacion::longitud_maxima(&datos.apellidos, 100) {
        errores.insert("apellidos", error);
    }

    errores
}

/// 转换为请求载荷；编辑模式从不携带 password
pub fn a_payload(datos: &DatosUsuario, es_edicion: bool) -> UsuarioPayload {
    let apellidos = datos.apellidos.trim();
    UsuarioPayload {
        username: datos.username.trim().to_string(),
        email: datos.email.trim().to_string(),
        nombre: datos.nombre.trim().to_string(),
        apellidos: if apellidos.is_empty() {
            None
        } else {
            Some(apellidos.to_string())
        },
        password: if es_edicion {
            None
        } else {
            Some(datos.password.clone())
        },
        activo: datos.activo,
    }
}

/// 成员关系差集：(需要分配的, 需要移除的)
pub fn diff_perfiles(
    actuales: &BTreeSet<i64>,
    deseados: &BTreeSet<i64>,
) -> (Vec<i64>, Vec<i64>) {
    let altas = deseados.difference(actuales).copied().collect();
    let bajas = actuales.difference(deseados).copied().collect();
    (altas, bajas)
}

/// 把用户身上的档案名称解析为目录里的 id
///
/// 用户记录只带名称（仅展示用）；目录里找不到的名称被忽略。
pub fn ids_de_perfiles(nombres: &[String], catalogo: &[Perfil]) -> BTreeSet<i64> {
    nombres
        .iter()
        .filter_map(|nombre| {
            catalogo
                .iter()
                .find(|perfil| &perfil.nombre == nombre)
                .map(|perfil| perfil.id)
        })
        .collect()
}

// =========================================================
// 表单状态 (signals)
// =========================================================

/// 表单状态结构体
///
/// 全部 `RwSignal`，实现 Copy，便于作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub username: RwSignal<String>,
    pub email: RwSignal<String>,
    pub nombre: RwSignal<String>,
    pub apellidos: RwSignal<String>,
    pub password: RwSignal<String>,
    pub activo: RwSignal<bool>,
    /// 勾选的档案 id
    pub perfiles: RwSignal<BTreeSet<i64>>,
    /// 打开表单时已有的档案 id（差集的基准）
    pub perfiles_iniciales: RwSignal<BTreeSet<i64>>,
    pub errores: RwSignal<HashMap<&'static str, String>>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            username: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            nombre: RwSignal::new(String::new()),
            apellidos: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            activo: RwSignal::new(true),
            perfiles: RwSignal::new(BTreeSet::new()),
            perfiles_iniciales: RwSignal::new(BTreeSet::new()),
            errores: RwSignal::new(HashMap::new()),
        }
    }

    /// 重置为创建模式的初始值
    pub fn reset(&self) {
        self.username.set(String::new());
        self.email.set(String::new());
        self.nombre.set(String::new());
        self.apellidos.set(String::new());
        self.password.set(String::new());
        self.activo.set(true);
        self.perfiles.set(BTreeSet::new());
        self.perfiles_iniciales.set(BTreeSet::new());
        self.errores.set(HashMap::new());
    }

    /// 用选中的用户预填（编辑模式）
    pub fn cargar(&self, usuario: &Usuario, catalogo: &[Perfil]) {
        let ids = ids_de_perfiles(&usuario.perfiles, catalogo);
        self.username.set(usuario.username.clone());
        self.email.set(usuario.email.clone());
        self.nombre.set(usuario.nombre.clone());
        self.apellidos
            .set(usuario.apellidos.clone().unwrap_or_default());
        self.password.set(String::new());
        self.activo.set(usuario.activo);
        self.perfiles.set(ids.clone());
        self.perfiles_iniciales.set(ids);
        self.errores.set(HashMap::new());
    }

    /// 当前字段快照
    pub fn instantanea(&self) -> DatosUsuario {
        DatosUsuario {
            username: self.username.get(),
            email: self.email.get(),
            nombre: self.nombre.get(),
            apellidos: self.apellidos.get(),
            password: self.password.get(),
            activo: self.activo.get(),
        }
    }

    /// 某字段的校验错误
    pub fn error_de(&self, campo: &'static str) -> Option<String> {
        self.errores.with(|errores| errores.get(campo).cloned())
    }

    /// 勾选/取消一个档案
    pub fn alternar_perfil(&self, id: i64) {
        self.perfiles.update(|seleccion| {
            if !seleccion.remove(&id) {
                seleccion.insert(id);
            }
        });
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datos_validos() -> DatosUsuario {
        DatosUsuario {
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            nombre: "John".into(),
            apellidos: "Doe".into(),
            password: "secreto1".into(),
            activo: true,
        }
    }

    fn perfil(id: i64, nombre: &str) -> Perfil {
        Perfil {
            id,
            nombre: nombre.into(),
            descripcion: None,
            fecha_creacion: None,
            fecha_modificacion: None,
        }
    }

    #[test]
    fn datos_completos_pasan_la_validacion() {
        assert!(validar_usuario(&datos_validos(), false).is_empty());
    }

    #[test]
    fn creacion_exige_username_y_password() {
        let datos = DatosUsuario {
            username: String::new(),
            password: String::new(),
            ..datos_validos()
        };
        let errores = validar_usuario(&datos, false);
        assert_eq!(errores.get("username").unwrap(), "Username es requerido");
        assert_eq!(errores.get("password").unwrap(), "Contraseña es requerida");

        // in edit mode those fields are not validated
        let errores = validar_usuario(&datos, true);
        assert!(!errores.contains_key("username"));
        assert!(!errores.contains_key("password"));
    }

    #[test]
    fn password_corta_es_rechazada() {
        let datos = DatosUsuario {
            password: "abc".into(),
            ..datos_validos()
        };
        let errores = validar_usuario(&datos, false);
        assert_eq!(errores.get("password").unwrap(), "Mínimo 6 caracteres");
    }

    #[test]
    fn email_invalido_es_rechazado() {
        let datos = DatosUsuario {
            email: "no-es-email".into(),
            ..datos_validos()
        };
        let errores = validar_usuario(&datos, false);
        assert_eq!(errores.get("email").unwrap(), "Email inválido");
    }

    #[test]
    fn payload_de_edicion_no_lleva_password() {
        let payload = a_payload(&datos_validos(), true);
        assert_eq!(payload.password, None);

        let payload = a_payload(&datos_validos(), false);
        assert_eq!(payload.password.as_deref(), Some("secreto1"));
    }

    #[test]
    fn payload_recorta_y_omite_apellidos_vacios() {
        let datos = DatosUsuario {
            apellidos: "   ".into(),
            username: " jdoe ".into(),
            ..datos_validos()
        };
        let payload = a_payload(&datos, false);
        assert_eq!(payload.apellidos, None);
        assert_eq!(payload.username, "jdoe");
    }

    #[test]
    fn diff_calcula_altas_y_bajas() {
        let actuales: BTreeSet<i64> = [1, 2, 3].into();
        let deseados: BTreeSet<i64> = [2, 3, 4, 5].into();
        let (altas, bajas) = diff_perfiles(&actuales, &deseados);
        assert_eq!(altas, vec![4, 5]);
        assert_eq!(bajas, vec![1]);
    }

    #[test]
    fn diff_sin_cambios_queda_vacio() {
        let conjunto: BTreeSet<i64> = [1, 2].into();
        let (altas, bajas) = diff_perfiles(&conjunto, &conjunto.clone());
        assert!(altas.is_empty());
        assert!(bajas.is_empty());
    }

    #[test]
    fn nombres_se_resuelven_contra_el_catalogo() {
        let catalogo = vec![perfil(1, "ADMIN"), perfil(2, "USER")];
        let ids = ids_de_perfiles(
            &["USER".to_string(), "FANTASMA".to_string()],
            &catalogo,
        );
        assert_eq!(ids, BTreeSet::from([2]));
    }
}
