pub mod aggregate;
pub mod especificaciones;

pub use aggregate::{
    count_missing_photo, Foto, NumeroParte, NumeroParteDto, Producto, ProductoDto,
    SugerenciaCodigo, TipoProducto,
};
