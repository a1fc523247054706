//! The shading styles the model can be drawn with.

use std::fmt;

/// A lighting model or stylised look for the main model.
///
/// Each style maps to a shader pair `shaders/<stem>.vert` and
/// `shaders/<stem>.frag`. Compiling those is the renderer's job.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShadingStyle {
    /// Per-fragment lighting.
    #[default]
    Phong,
    /// Per-vertex lighting, interpolated across faces.
    Gouraud,
    Grayscale,
    /// Pencil-hatching look.
    Sketch,
    /// Renders the lit model as text glyphs.
    Ascii,
}

impl ShadingStyle {
    /// Every style in selection order.
    pub const ALL: [ShadingStyle; 5] = [
        ShadingStyle::Phong,
        ShadingStyle::Gouraud,
        ShadingStyle::Grayscale,
        ShadingStyle::Sketch,
        ShadingStyle::Ascii,
    ];

    /// Name shown in a style picker.
    pub fn name(self) -> &'static str {
        match self {
            Self::Phong => "Phong",
            Self::Gouraud => "Gouraud",
            Self::Grayscale => "Grayscale",
            Self::Sketch => "Sketch",
            Self::Ascii => "ASCII",
        }
    }

    /// File stem of the style's shaders.
    pub fn shader_stem(self) -> &'static str {
        match self {
            Self::Phong => "phong",
            Self::Gouraud => "gouraud",
            Self::Grayscale => "grayscale",
            Self::Sketch => "sketch",
            Self::Ascii => "ascii",
        }
    }

    pub fn vertex_shader_path(self) -> String {
        format!("shaders/{}.vert", self.shader_stem())
    }

    pub fn fragment_shader_path(self) -> String {
        format!("shaders/{}.frag", self.shader_stem())
    }

    /// Position in [`ALL`](Self::ALL).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Style at `index` in [`ALL`](Self::ALL).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The following style, wrapping around after the last.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ShadingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all() {
        let mut style = ShadingStyle::default();
        let mut seen = Vec::new();
        for _ in 0..ShadingStyle::ALL.len() {
            seen.push(style);
            style = style.next();
        }
        assert_eq!(seen, ShadingStyle::ALL);
        assert_eq!(style, ShadingStyle::Phong);
    }

    #[test]
    fn index_round_trips() {
        for style in ShadingStyle::ALL {
            assert_eq!(ShadingStyle::from_index(style.index()), Some(style));
        }
        assert_eq!(ShadingStyle::from_index(5), None);
    }

    #[test]
    fn shader_paths() {
        assert_eq!(ShadingStyle::Ascii.to_string(), "ASCII");
        assert_eq!(ShadingStyle::Gouraud.vertex_shader_path(), "shaders/gouraud.vert");
        assert_eq!(ShadingStyle::Sketch.fragment_shader_path(), "shaders/sketch.frag");
    }
}
