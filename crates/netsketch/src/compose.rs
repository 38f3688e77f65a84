//! The rendering pass.
//!
//! [`DiagramComposer`] turns an ordered sequence of layer descriptors into a
//! [`Diagram`]. A pass moves through fixed [`Stage`]s:
//!
//! ```text
//! Init → SizingCanvas → RenderingInput → RenderingBody(i) → Terminating → Done
//! ```
//!
//! Every descriptor is validated before any geometry is produced. The canvas
//! is owned by the pass; each shape borrows it only while drawing itself and
//! the router only while drawing one connector group.

use std::{fmt, num::NonZeroU32};

use log::{debug, info, warn};

use netsketch_core::{
    color::Color,
    draw::{
        ActivationDefinition, CANVAS_HEIGHT, Canvas, ConnectorError, ConnectorRouter,
        DenseDefinition, DropoutDefinition, EmbeddingDefinition, FlattenDefinition,
        GenericDefinition, GlyphDefinition, InputDefinition, LabelMode, NormalizationDefinition,
        RecurrentDefinition, Shape, StackDefinition, StackKind, StrokeCap, StrokeDefinition,
    },
    palette::Palette,
};

use crate::{
    config::{AppConfig, MismatchPolicy},
    error::NetsketchError,
    layout,
    model::{DescriptorError, LayerDescriptor, LayerKind, TensorShape},
};

/// Horizontal position of the input glyph.
pub const INPUT_START_X: f32 = 20.0;

/// Validated settings for one rendering pass.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    background: Color,
    palette: Palette,
    labels: LabelMode,
    show_connectors: bool,
    output_marker: bool,
    mismatch: MismatchPolicy,
    connector_stroke: StrokeDefinition,
}

impl RenderOptions {
    /// Resolves and validates an [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`NetsketchError::Config`] for an invalid background color or
    /// connector style and [`NetsketchError::UnknownPalette`] if the palette
    /// cannot be resolved.
    pub fn from_config(config: &AppConfig) -> Result<Self, NetsketchError> {
        let background = config
            .style()
            .background_color()
            .map_err(NetsketchError::Config)?
            .unwrap_or_else(Color::white);
        let palette = config.style().palette()?;
        let style = config
            .display()
            .connector_style()
            .map_err(NetsketchError::Config)?;

        Ok(Self {
            background,
            palette,
            labels: config.display().labels(),
            show_connectors: config.display().show_connectors(),
            output_marker: config.display().output_marker(),
            mismatch: config.display().connector_mismatch(),
            connector_stroke: StrokeDefinition::new(Color::default(), 1.0)
                .with_style(style)
                .with_cap(StrokeCap::Round),
        })
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn labels(&self) -> LabelMode {
        self.labels
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Color::white(),
            palette: Palette::default(),
            labels: LabelMode::None,
            show_connectors: false,
            output_marker: false,
            mismatch: MismatchPolicy::Fail,
            connector_stroke: ConnectorRouter::default().stroke().clone(),
        }
    }
}

/// Progress of a rendering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    SizingCanvas,
    RenderingInput,
    RenderingBody(usize),
    Terminating,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::SizingCanvas => f.write_str("sizing canvas"),
            Self::RenderingInput => f.write_str("rendering input"),
            Self::RenderingBody(i) => write!(f, "rendering body[{i}]"),
            Self::Terminating => f.write_str("terminating"),
            Self::Done => f.write_str("done"),
        }
    }
}

/// Where one glyph ended up on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub name: String,
    pub glyph: &'static str,
    pub start_x: f32,
    pub end_x: f32,
}

/// The result of a rendering pass.
#[derive(Debug, Clone)]
pub struct Diagram {
    canvas: Canvas,
    placements: Vec<Placement>,
    connector_groups: usize,
    terminated: bool,
}

impl Diagram {
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    /// One entry per drawn glyph, input first.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of connector groups drawn between consecutive glyphs.
    pub fn connector_groups(&self) -> usize {
        self.connector_groups
    }

    /// Whether the terminal arrowhead was drawn.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn width(&self) -> f32 {
        self.canvas.width()
    }

    pub fn height(&self) -> f32 {
        self.canvas.height()
    }
}

/// Runs rendering passes with fixed options.
#[derive(Debug)]
pub struct DiagramComposer {
    options: RenderOptions,
    router: ConnectorRouter,
    stage: Stage,
}

impl DiagramComposer {
    pub fn new(options: RenderOptions) -> Self {
        let router = ConnectorRouter::new(options.connector_stroke.clone());
        Self {
            options,
            router,
            stage: Stage::Init,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, stage: Stage) {
        debug!(from:% = self.stage, to:% = stage; "Composer stage");
        self.stage = stage;
    }

    /// Renders `layers` onto a fresh canvas.
    ///
    /// # Errors
    ///
    /// - [`NetsketchError::EmptyModel`] for an empty sequence.
    /// - [`NetsketchError::Descriptor`] if any layer fails validation.
    /// - [`NetsketchError::Connector`] on an anchor-count mismatch when the
    ///   mismatch policy is [`MismatchPolicy::Fail`].
    pub fn compose(&mut self, layers: &[LayerDescriptor]) -> Result<Diagram, NetsketchError> {
        self.stage = Stage::Init;
        info!(layers = layers.len(); "Composing diagram");

        if layers.is_empty() {
            return Err(NetsketchError::EmptyModel);
        }
        for (index, layer) in layers.iter().enumerate() {
            layer.validate(index)?;
        }

        self.advance(Stage::SizingCanvas);
        let width = layout::estimate(layers.iter().map(LayerDescriptor::tag));
        let mut canvas = Canvas::new(width as f32, CANVAS_HEIGHT, self.options.background);
        debug!(width, height = CANVAS_HEIGHT; "Canvas sized");

        self.advance(Stage::RenderingInput);
        let palette = self.options.palette;
        let labels = self.options.labels;

        let (input_name, input_shape, body) = match layers[0].kind() {
            LayerKind::Input { shape } => (layers[0].name(), shape.clone(), &layers[1..]),
            _ => ("input", layers[0].input_shape().cloned(), layers),
        };
        let body_offset = layers.len() - body.len();

        let mut previous = Shape::new(input_name, Box::new(InputDefinition::new()), INPUT_START_X, &palette)
            .with_properties(input_property_lines(input_shape.as_ref()));
        let mut cursor = previous.draw(&mut canvas, labels);
        let mut placements = vec![placement(&previous, cursor)];
        let mut connector_groups = 0;

        for (i, layer) in body.iter().enumerate() {
            let index = body_offset + i;
            self.advance(Stage::RenderingBody(index));

            let (name, definition) = body_glyph(layer, index)?;
            let mut shape = Shape::new(name, definition, cursor, &palette)
                .with_properties(layer.property_lines());
            cursor = shape.draw(&mut canvas, labels);
            debug!(
                index,
                name = shape.name(),
                glyph = shape.kind_name(),
                start_x = shape.start_x(),
                end_x = cursor;
                "Layer drawn"
            );
            placements.push(placement(&shape, cursor));

            if self.options.show_connectors {
                match self.router.connect(&mut canvas, &previous, &shape) {
                    Ok(_) => connector_groups += 1,
                    Err(err @ ConnectorError::ArityMismatch { .. })
                        if self.options.mismatch == MismatchPolicy::Skip =>
                    {
                        warn!(error:% = err; "Skipping connector group");
                    }
                    Err(err) => return Err(err.into()),
                }
            }

            previous = shape;
        }

        let mut terminated = false;
        if self.options.show_connectors && self.options.output_marker {
            self.advance(Stage::Terminating);
            self.router.terminate(&mut canvas, &previous)?;
            terminated = true;
        }

        self.advance(Stage::Done);
        info!(
            width,
            glyphs = placements.len(),
            connector_groups,
            terminated;
            "Diagram composed"
        );

        Ok(Diagram {
            canvas,
            placements,
            connector_groups,
            terminated,
        })
    }
}

fn placement(shape: &Shape<'_>, end_x: f32) -> Placement {
    Placement {
        name: shape.name().to_string(),
        glyph: shape.kind_name(),
        start_x: shape.start_x(),
        end_x,
    }
}

fn input_property_lines(shape: Option<&TensorShape>) -> Vec<String> {
    vec![match shape {
        Some(shape) => format!("shape: {shape}"),
        None => "shape: unknown".to_string(),
    }]
}

fn depth_source(
    value: u32,
    index: usize,
    layer: &LayerDescriptor,
    attribute: &'static str,
) -> Result<NonZeroU32, DescriptorError> {
    NonZeroU32::new(value).ok_or_else(|| DescriptorError::NonPositive {
        index,
        name: layer.name().to_string(),
        attribute,
        value: 0,
    })
}

/// Picks the glyph for a non-leading layer and the name it is shown with.
fn body_glyph(
    layer: &LayerDescriptor,
    index: usize,
) -> Result<(String, Box<dyn GlyphDefinition>), DescriptorError> {
    let spatial = layer.input_shape().map_or(0, TensorShape::max_spatial);
    let name = layer.name().to_string();

    let definition: Box<dyn GlyphDefinition> = match layer.kind() {
        LayerKind::Input { .. } => {
            warn!(index, name = layer.name(); "Input layer after the first position, drawing generic glyph");
            Box::new(GenericDefinition::new())
        }
        LayerKind::Dense { .. } => Box::new(DenseDefinition::new()),
        LayerKind::Conv { filters, .. } => Box::new(StackDefinition::new(
            StackKind::Convolution,
            depth_source(*filters, index, layer, "filters")?,
            spatial,
        )),
        LayerKind::ConvRecurrent { filters, .. } => Box::new(StackDefinition::new(
            StackKind::ConvRecurrent,
            depth_source(*filters, index, layer, "filters")?,
            spatial,
        )),
        LayerKind::Pooling { .. } => {
            let channels = layer
                .input_shape()
                .and_then(TensorShape::channels)
                .unwrap_or(1);
            Box::new(StackDefinition::new(
                StackKind::Pooling,
                depth_source(channels, index, layer, "channel count")?,
                spatial,
            ))
        }
        LayerKind::Embedding { .. } => Box::new(EmbeddingDefinition::new()),
        LayerKind::Recurrent { bidirectional, .. } => {
            Box::new(RecurrentDefinition::new(*bidirectional))
        }
        LayerKind::Bidirectional(inner) => {
            return Ok((
                format!("Bi({})", inner.name()),
                Box::new(RecurrentDefinition::new(true)),
            ));
        }
        LayerKind::Activation { .. } => Box::new(ActivationDefinition::new()),
        LayerKind::Flatten => Box::new(FlattenDefinition::new()),
        LayerKind::Normalization => Box::new(NormalizationDefinition::new()),
        LayerKind::Dropout { rate } => Box::new(DropoutDefinition::new(*rate)),
        LayerKind::Generic { .. } => Box::new(GenericDefinition::new()),
    };

    Ok((name, definition))
}
