use morph_core::raster::SoftwareRaster;
use morph_core::render::DrawSurface;
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// The `<canvas>` and its 2D context, fed from a `SoftwareRaster`.
pub struct CanvasTarget {
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
}

impl CanvasTarget {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok());
        if ctx.is_none() {
            log::warn!("canvas refused a 2d context");
        }
        Self { canvas, ctx }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn is_available(&self) -> bool {
        self.ctx.is_some()
    }

    /// Match the backing store to the raster and the CSS box to `css_size`.
    fn fit(&self, raster: &SoftwareRaster, css_size: f32) {
        let (w, h) = raster.size();
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            let style = self.canvas.style();
            let css = format!("{}px", css_size.round());
            style.set_property("width", &css).ok();
            style.set_property("height", &css).ok();
        }
    }

    pub fn blit(&self, raster: &SoftwareRaster, css_size: f32) -> Result<(), JsValue> {
        let Some(ctx) = &self.ctx else {
            return Ok(());
        };
        self.fit(raster, css_size);
        let (w, h) = raster.size();
        let image =
            ImageData::new_with_u8_clamped_array_and_sh(Clamped(raster.as_bytes()), w, h)?;
        ctx.put_image_data(&image, 0.0, 0.0)
    }

    pub fn set_opacity(&self, opacity: f32) {
        self.canvas
            .style()
            .set_property("opacity", &format!("{:.3}", opacity))
            .ok();
    }
}
