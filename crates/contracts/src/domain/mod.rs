pub mod a001_marca;
pub mod a002_vehiculo;
pub mod a003_producto;
pub mod a004_cliente;
pub mod a005_venta;
pub mod a006_devolucion;
pub mod a007_comision;
pub mod a008_conteo_fisico;
pub mod a009_interaccion;
pub mod a010_notificacion;
pub mod common;
