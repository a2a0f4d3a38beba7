//! Tab titles, one place for every page key.

use super::super::global_context::parse_detail_key;

/// Title shown for a page key. Unknown keys give an empty string.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "d400_resumen" => "Resumen",

        "a003_producto_valvulas" => "Tienda de válvulas",
        "a003_producto" => "Catálogo",
        "a003_producto_new" => "Nuevo producto",
        "a001_marca" => "Marcas",
        "a002_vehiculo" => "Vehículos",

        "a004_cliente" => "Clientes",
        "a004_cliente_new" => "Nuevo cliente",
        "a005_venta" => "Ventas",
        "a006_devolucion" => "Devoluciones",
        "a007_comision" => "Comisiones",
        "a008_conteo_fisico" => "Conteos físicos",
        "a009_interaccion" => "Interacciones",
        "a010_notificacion" => "Notificaciones",

        "u501_checkout" => "Carrito",
        "sys_profile" => "Mi perfil",

        _ => "",
    }
}

/// Singular entity name used in record tab titles.
pub fn entity_element_name(aggregate_key: &str) -> &'static str {
    match aggregate_key {
        "a003_producto" => "Producto",
        "a004_cliente" => "Cliente",
        "a005_venta" => "Venta",
        _ => "",
    }
}

/// «<entity> · <identifier>»
pub fn detail_tab_label(entity_label: &'static str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

/// Title for a key restored from the URL, record tabs included.
pub fn restored_tab_title(key: &str) -> String {
    let label = tab_label_for_key(key);
    if !label.is_empty() {
        return label.to_string();
    }
    for aggregate in ["a003_producto", "a004_cliente", "a005_venta"] {
        if let Some(id) = parse_detail_key(key, aggregate) {
            return detail_tab_label(entity_element_name(aggregate), &format!("#{}", id));
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restored_titles() {
        assert_eq!(restored_tab_title("a005_venta"), "Ventas");
        assert_eq!(restored_tab_title("a005_venta_detail_15"), "Venta · #15");
        assert_eq!(restored_tab_title("desconocido"), "desconocido");
    }
}
