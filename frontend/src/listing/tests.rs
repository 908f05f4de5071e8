use super::*;

// =========================================================
// Query routing
// =========================================================

#[test]
fn termino_vacio_usa_listado_plano() {
    let consulta = ListingQuery {
        page: 0,
        size: 10,
        termino: String::new(),
    };
    assert!(!consulta.usa_busqueda());

    // whitespace-only is still "no filter"
    let blanca = ListingQuery {
        termino: "   ".to_string(),
        ..consulta
    };
    assert!(!blanca.usa_busqueda());
}

#[test]
fn termino_presente_usa_busqueda() {
    let consulta = ListingQuery {
        page: 2,
        size: 25,
        termino: "jdoe".to_string(),
    };
    assert!(consulta.usa_busqueda());
}

#[test]
fn tamano_por_defecto_esta_entre_los_ofrecidos() {
    assert!(TAMANOS_PAGINA.contains(&TAMANO_DEFECTO));
}

// =========================================================
// Stale-response suppression
// =========================================================

#[test]
fn una_generacion_es_actual_hasta_la_siguiente() {
    let guardia = StaleGuard::default();
    let g1 = guardia.avanzar();
    assert!(guardia.es_actual(g1));

    // a newer request supersedes the older one
    let g2 = guardia.avanzar();
    assert!(!guardia.es_actual(g1));
    assert!(guardia.es_actual(g2));
}

#[test]
fn respuestas_tardias_de_varias_generaciones_quedan_descartadas() {
    let guardia = StaleGuard::default();
    let viejas: Vec<u64> = (0..5).map(|_| guardia.avanzar()).collect();
    let actual = guardia.avanzar();

    for vieja in viejas {
        assert!(!guardia.es_actual(vieja));
    }
    assert!(guardia.es_actual(actual));
}

#[test]
fn guardias_clonadas_comparten_generacion() {
    // the Effect and the in-flight future hold clones of the same guard
    let guardia = StaleGuard::default();
    let clon = guardia.clone();

    let g1 = guardia.avanzar();
    assert!(clon.es_actual(g1));

    let g2 = clon.avanzar();
    assert!(!guardia.es_actual(g1));
    assert!(guardia.es_actual(g2));
}

// =========================================================
// Pagination footer
// =========================================================

#[test]
fn rango_de_la_primera_pagina() {
    assert_eq!(rango_mostrado(0, 10, 42), Some((1, 10)));
}

#[test]
fn rango_de_la_ultima_pagina_parcial() {
    assert_eq!(rango_mostrado(4, 10, 42), Some((41, 42)));
}

#[test]
fn rango_sin_resultados() {
    assert_eq!(rango_mostrado(0, 10, 0), None);
    assert_eq!(rango_mostrado(0, 0, 42), None);
    // page beyond the filtered set
    assert_eq!(rango_mostrado(9, 10, 42), None);
}
