use spl_image::ResolvedImage;

/// An image fully copied into memory and ready to be entered.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LoadedImage {
    pub image: ResolvedImage,
    /// Bytes written at the load address. Raw mode rounds up to whole sectors.
    pub bytes_loaded: usize,
}
