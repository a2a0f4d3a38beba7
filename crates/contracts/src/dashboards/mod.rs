pub mod d400_resumen;
