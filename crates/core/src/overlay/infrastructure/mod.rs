pub mod image_surface;
