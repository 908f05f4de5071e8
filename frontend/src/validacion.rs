//! 表单字段校验
//!
//! 纯函数，返回字段级错误文案。校验在任何网络调用之前完成，
//! 错误就地显示在对应字段下方，从不进入通知通道。

/// 必填字段
pub fn requerido(valor: &str, mensaje: &str) -> Option<String> {
    if valor.trim().is_empty() {
        Some(mensaje.to_string())
    } else {
        None
    }
}

/// 长度区间（按字符数，忽略首尾空白）
pub fn longitud_entre(valor: &str, min: usize, max: usize) -> Option<String> {
    let largo = valor.trim().chars().count();
    if largo < min {
        Some(format!("Mínimo {} caracteres", min))
    } else if largo > max {
        Some(format!("Máximo {} caracteres", max))
    } else {
        None
    }
}

/// 长度上限（空值合法，交给 `requerido` 判断必填）
pub fn longitud_maxima(valor: &str, max: usize) -> Option<String> {
    if valor.trim().chars().count() > max {
        Some(format!("Máximo {} caracteres", max))
    } else {
        None
    }
}

/// 标准地址形式：local@dominio.tld，tld 至少两个字母
pub fn email_valido(valor: &str) -> Option<String> {
    if es_email(valor.trim()) {
        None
    } else {
        Some("Email inválido".to_string())
    }
}

fn es_email(valor: &str) -> bool {
    if valor.contains(' ') {
        return false;
    }
    let Some((local, dominio)) = valor.split_once('@') else {
        return false;
    };
    if local.is_empty() || dominio.is_empty() || dominio.contains('@') {
        return false;
    }
    if dominio.starts_with('.') || dominio.ends_with('.') || dominio.contains("..") {
        return false;
    }
    let Some((_, tld)) = dominio.rsplit_once('.') else {
        return false;
    };
    tld.chars().count() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requerido_rechaza_solo_espacios() {
        assert_eq!(
            requerido("   ", "Username es requerido"),
            Some("Username es requerido".to_string())
        );
        assert_eq!(requerido("jdoe", "Username es requerido"), None);
    }

    #[test]
    fn longitud_entre_marca_ambos_extremos() {
        assert_eq!(longitud_entre("ab", 3, 50), Some("Mínimo 3 caracteres".to_string()));
        assert_eq!(longitud_entre(&"x".repeat(51), 3, 50), Some("Máximo 50 caracteres".to_string()));
        assert_eq!(longitud_entre("abc", 3, 50), None);
        // surrounding whitespace does not count
        assert_eq!(longitud_entre("  abc  ", 3, 50), None);
    }

    #[test]
    fn longitud_maxima_acepta_vacio() {
        assert_eq!(longitud_maxima("", 255), None);
        assert_eq!(longitud_maxima(&"x".repeat(256), 255), Some("Máximo 255 caracteres".to_string()));
    }

    #[test]
    fn emails_validos() {
        for email in [
            "jdoe@example.com",
            "nombre.apellido@sub.dominio.org",
            "user+tag@example.co",
        ] {
            assert_eq!(email_valido(email), None, "debería aceptar {email}");
        }
    }

    #[test]
    fn emails_invalidos() {
        for email in [
            "",
            "sin-arroba",
            "@example.com",
            "user@",
            "user@@example.com",
            "user@dominio",
            "user@dominio.c",
            "user@.com",
            "user@dominio..com",
            "user name@example.com",
            "user@dominio.c0m",
        ] {
            assert!(email_valido(email).is_some(), "debería rechazar {email}");
        }
    }
}
