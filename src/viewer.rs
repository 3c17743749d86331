//! Native window used by [`crate::Plot::show`].
//!
//! The figure is painted once into an RGB buffer and displayed as a texture. A toolbar
//! button saves the figure through a file dialog.

use crate::error::{PlotError, Result};
use crate::figure::Figure;
use crate::models::{BBox, SaveOptions, ShowOptions};
use eframe::egui;
use std::path::PathBuf;

/// Open a blocking window showing `figure`; returns once the window is closed.
pub fn show_figure(figure: Figure, options: &ShowOptions) -> Result<()> {
    let pixels = figure.to_rgb()?;
    let (w, h) = figure.size();

    let native = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([w as f32, h as f32 + 40.0])
            .with_min_inner_size([200.0, 160.0])
            .with_title(options.window_title.clone()),
        ..Default::default()
    };

    log::debug!("opening viewer window for a {w}x{h} figure");
    eframe::run_native(
        &options.window_title,
        native,
        Box::new(move |_cc| Ok(Box::new(FigureViewer::new(figure, pixels)))),
    )
    .map_err(|e| PlotError::Viewer(e.to_string()))
}

struct FigureViewer {
    figure: Figure,
    pixels: Vec<u8>,
    texture: Option<egui::TextureHandle>,
    status: Option<String>,
}

impl FigureViewer {
    fn new(figure: Figure, pixels: Vec<u8>) -> Self {
        Self {
            figure,
            pixels,
            texture: None,
            status: None,
        }
    }

    fn save_dialog(&mut self) {
        let start = dirs::picture_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(start)
            .set_file_name("figure.png")
            .add_filter("PNG image", &["png"])
            .add_filter("SVG image", &["svg"])
            .save_file()
        else {
            return;
        };

        let options = SaveOptions {
            bbox: Some(BBox::Tight),
            ..Default::default()
        };
        self.status = Some(match self.figure.save(&path, &options) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => {
                log::error!("saving {} failed: {e}", path.display());
                format!("Error: {e}")
            }
        });
    }
}

impl eframe::App for FigureViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (w, h) = self.figure.size();
        let texture = self.texture.get_or_insert_with(|| {
            let image = egui::ColorImage::from_rgb([w as usize, h as usize], &self.pixels);
            ctx.load_texture("figure", image, egui::TextureOptions::LINEAR)
        });
        let sized = egui::load::SizedTexture::from_handle(texture);

        let mut save_clicked = false;
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                save_clicked = ui.button("Save as…").clicked();
                if let Some(status) = &self.status {
                    ui.label(status);
                }
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                ui.image(sized);
            });
        });

        if save_clicked {
            self.save_dialog();
        }
    }
}
