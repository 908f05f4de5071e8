//! 会话持久化
//!
//! 把会话（token + 用户记录）写入浏览器 LocalStorage 的两个固定键。
//! 存储是认证状态的唯一事实来源：内存中的 AuthState 只是它的缓存。

use gestion_shared::Sesion;
use gloo_storage::{LocalStorage, Storage};

const CLAVE_TOKEN: &str = "gestion_token";
const CLAVE_USUARIO: &str = "gestion_usuario";

pub struct SessionStore;

impl SessionStore {
    /// 持久化会话。两个键要么都写入，要么都不存在：
    /// 任一写入失败则回滚清除，避免半残状态破坏
    /// "token 存在 ⇔ 已认证" 的不变式。
    pub fn guardar(sesion: &Sesion) -> bool {
        let token_ok = LocalStorage::set(CLAVE_TOKEN, &sesion.token).is_ok();
        let usuario_ok = LocalStorage::set(CLAVE_USUARIO, sesion).is_ok();
        if !(token_ok && usuario_ok) {
            Self::limpiar();
            return false;
        }
        true
    }

    /// 无条件清除两个键，从不失败
    pub fn limpiar() {
        LocalStorage::delete(CLAVE_TOKEN);
        LocalStorage::delete(CLAVE_USUARIO);
    }

    /// 读取持久化的会话记录；缺失或无法反序列化时返回 None
    pub fn cargar() -> Option<Sesion> {
        LocalStorage::get::<Sesion>(CLAVE_USUARIO).ok()
    }

    /// 当前 token（每个出站请求都会读取）
    pub fn token() -> Option<String> {
        LocalStorage::get::<String>(CLAVE_TOKEN).ok()
    }

    /// 仅以 token 是否存在判断认证状态，不校验过期
    pub fn esta_autenticado() -> bool {
        Self::token().is_some()
    }
}
