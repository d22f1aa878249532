// ShakeUp - Screen Rendering
//
// Draws the screen model onto any 1-bit embedded-graphics target.
//
// Layout (128x64, 6x10 font, 21 columns):
//   y=0   X-Axis: <value>
//   y=11  Y-Axis: <value>
//   y=22  Z-Axis: <value>
//   y=33  Sensor: ON/OFF/N/A
//   y=44  [x] Shake toasts
//   toast banner (inverted) anchored to the bottom edge, up to 3 lines

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::config::*;
use crate::ui::screen::ScreenModel;

pub const CHAR_WIDTH: u32 = 6;
pub const LINE_HEIGHT: u32 = 10;
pub const COLUMNS: usize = (SCREEN_WIDTH / CHAR_WIDTH) as usize; // 21
pub const ROW_PITCH: i32 = 11;
pub const TOAST_MAX_LINES: usize = 3;

pub fn render_screen<D>(screen: &ScreenModel, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;

    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let rows = [
        screen.x_label.as_str(),
        screen.y_label.as_str(),
        screen.z_label.as_str(),
        screen.switch_text(),
        screen.checkbox_text(),
    ];
    for (i, row) in rows.iter().enumerate() {
        Text::with_baseline(row, Point::new(0, i as i32 * ROW_PITCH), style, Baseline::Top)
            .draw(target)?;
    }

    if let Some(toast) = screen.toast() {
        draw_toast(&toast.text, target)?;
    }
    Ok(())
}

/// Single line of text centred on a blank screen (boot splash).
pub fn render_centered_text<D>(text: &str, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    let center = Point::new(SCREEN_WIDTH as i32 / 2, SCREEN_HEIGHT as i32 / 2);
    Text::with_text_style(text, center, style, text_style).draw(target)?;
    Ok(())
}

fn draw_toast<D>(text: &str, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let lines = wrap_text(text, COLUMNS);
    let lines = &lines[..lines.len().min(TOAST_MAX_LINES)];
    if lines.is_empty() {
        return Ok(());
    }

    let height = lines.len() as u32 * LINE_HEIGHT + 2;
    let top = (SCREEN_HEIGHT - height) as i32;
    Rectangle::new(Point::new(0, top), Size::new(SCREEN_WIDTH, height))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(target)?;

    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::Off);
    for (i, line) in lines.iter().enumerate() {
        let y = top + 1 + (i as u32 * LINE_HEIGHT) as i32;
        Text::with_baseline(line, Point::new(0, y), style, Baseline::Top).draw(target)?;
    }
    Ok(())
}

/// Greedy word wrap to `width` columns. Words longer than a line are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current.is_empty() { word.len() } else { current.chars().count() + 1 + word.len() };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
