use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text},
};

use embedded_text::{
    TextBox,
    alignment::{HorizontalAlignment, VerticalAlignment},
    style::TextBoxStyleBuilder,
};

use image::GenericImageView;
use image::imageops::FilterType;

/// Position sentinel: let the primitive place the content within its region.
pub const AUTO_POS: Point = Point::new(-1, -1);

/// Draw a string into a frame.
///
/// With [`AUTO_POS`] the text is centered both ways inside the frame;
/// any other position is an offset from the frame's top-left corner,
/// baseline at the top.
pub fn draw_string<D>(
    target: &mut D,
    frame: Rectangle,
    font: &'static MonoFont<'static>,
    text: &str,
    color: Rgb888,
    pos: Point,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let style = MonoTextStyle::new(font, color);
    if pos == AUTO_POS {
        let box_style = TextBoxStyleBuilder::new()
            .alignment(HorizontalAlignment::Center)
            .vertical_alignment(VerticalAlignment::Middle)
            .build();
        TextBox::with_textbox_style(text, frame, style, box_style).draw(target)?;
    } else {
        Text::with_baseline(text, frame.top_left + pos, style, Baseline::Top).draw(target)?;
    }
    Ok(())
}

/// Draw a decoded raster image scaled to `height` (aspect preserved).
///
/// Fully transparent pixels are skipped so icons with alpha overlay the
/// slot text cleanly. [`AUTO_POS`] centers the image on the target.
pub fn draw_image<D>(
    target: &mut D,
    source: &image::DynamicImage,
    height: u32,
    pos: Point,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888> + OriginDimensions,
{
    let height = height.max(1);
    let raster = if source.height() == height {
        source.to_rgba8()
    } else {
        let width =
            ((source.width() as u64 * height as u64) / source.height().max(1) as u64).max(1) as u32;
        source.resize_exact(width, height, FilterType::Lanczos3).to_rgba8()
    };

    let bounds = target.size();
    let origin = if pos == AUTO_POS {
        Point::new(
            (bounds.width as i32 - raster.width() as i32) / 2,
            (bounds.height as i32 - raster.height() as i32) / 2,
        )
    } else {
        pos
    };

    target.draw_iter(
        raster
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[3] >= 128)
            .map(|(x, y, p)| {
                Pixel(
                    origin + Point::new(x as i32, y as i32),
                    Rgb888::new(p.0[0], p.0[1], p.0[2]),
                )
            }),
    )?;
    Ok(())
}
