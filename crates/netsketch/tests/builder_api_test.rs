//! Integration tests for the DiagramBuilder API

use float_cmp::assert_approx_eq;

use netsketch::{
    DiagramBuilder, NetsketchError,
    config::{AppConfig, MismatchPolicy},
    draw::{LabelMode, Primitive, RenderLayer},
    model::{DescriptorError, ModelFormat},
    palette::PaletteName,
};

const MNIST: &str = r#"
name = "mnist"

[[layers]]
class = "InputLayer"
name = "input_1"
batch_shape = ["None", 28, 28, 1]

[[layers]]
class = "Conv2D"
name = "conv2d"
filters = 32
kernel_size = [3, 3]
activation = "relu"
input_shape = ["None", 28, 28, 1]
output_shape = ["None", 26, 26, 32]

[[layers]]
class = "MaxPooling2D"
name = "max_pooling2d"
pool_size = [2, 2]
input_shape = ["None", 26, 26, 32]
output_shape = ["None", 13, 13, 32]

[[layers]]
class = "Flatten"
name = "flatten"

[[layers]]
class = "Dropout"
name = "dropout"
rate = 0.5

[[layers]]
class = "Dense"
name = "dense"
units = 10
activation = "softmax"
"#;

#[test]
fn test_render_mnist_svg() {
    let builder = DiagramBuilder::default();
    let layers = builder.load_model(MNIST, ModelFormat::Toml).unwrap();
    assert_eq!(layers.len(), 6);

    let svg = builder.render_svg(&layers).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("</svg>"));
    // 60 + 180 + 180 + 140 + 80 + 80 + 60
    assert!(svg.contains("viewBox=\"0 0 780 320\""));
}

#[test]
fn test_compose_reports_placements() {
    let builder = DiagramBuilder::default();
    let layers = builder.load_model(MNIST, ModelFormat::Toml).unwrap();
    let diagram = builder.compose(&layers).unwrap();

    let glyphs: Vec<_> = diagram.placements().iter().map(|p| p.glyph).collect();
    assert_eq!(
        glyphs,
        vec!["input", "conv", "pooling", "flatten", "dropout", "dense"]
    );
    assert_approx_eq!(f32, diagram.width(), 780.0);
    assert_eq!(diagram.connector_groups(), 0);
}

#[test]
fn test_labels_follow_config() {
    let mut config = AppConfig::default();
    config.display_mut().set_labels(LabelMode::Properties);
    let builder = DiagramBuilder::new(config);
    let layers = builder.load_model(MNIST, ModelFormat::Toml).unwrap();
    let svg = builder.render_svg(&layers).unwrap();

    assert!(svg.contains("conv2d"));
    assert!(svg.contains("filters: 32"));
    assert!(svg.contains("kernel: (3, 3)"));
    assert!(svg.contains("rate: 0.5"));
}

#[test]
fn test_no_labels_by_default() {
    let builder = DiagramBuilder::default();
    let layers = builder.load_model(MNIST, ModelFormat::Toml).unwrap();
    let diagram = builder.compose(&layers).unwrap();
    let texts = diagram
        .canvas()
        .primitives()
        .filter(|p| matches!(p, Primitive::Text { .. }))
        .count();
    assert_eq!(texts, 0);
}

#[test]
fn test_json_model() {
    let source = r#"{
        "layers": [
            {"class": "Embedding", "input_dim": 1000, "output_dim": 64},
            {"class": "Bidirectional", "layer": {"class": "LSTM", "name": "lstm", "units": 32}},
            {"class": "Dense", "units": 1, "activation": "sigmoid"}
        ]
    }"#;

    let builder = DiagramBuilder::default();
    let layers = builder.load_model(source, ModelFormat::Json).unwrap();
    let diagram = builder.compose(&layers).unwrap();

    let names: Vec<_> = diagram.placements().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["input", "Embedding", "Bi(lstm)", "Dense"]);
}

#[test]
fn test_connectors_and_output_marker() {
    let source = r#"
        [[layers]]
        class = "InputLayer"
        shape = ["None", 16]

        [[layers]]
        class = "Dense"
        units = 8

        [[layers]]
        class = "ReLU"
    "#;

    let mut config = AppConfig::default();
    config.display_mut().set_show_connectors(true);
    config.display_mut().set_output_marker(true);
    let builder = DiagramBuilder::new(config);
    let layers = builder.load_model(source, ModelFormat::Toml).unwrap();
    let diagram = builder.compose(&layers).unwrap();

    assert_eq!(diagram.connector_groups(), 2);
    assert!(diagram.is_terminated());
    let arrowheads = diagram
        .canvas()
        .primitives_on(RenderLayer::Connector)
        .filter(|p| matches!(p, Primitive::Polygon { .. }))
        .count();
    assert_eq!(arrowheads, 2);
}

#[test]
fn test_mismatch_policy() {
    let source = r#"
        [[layers]]
        class = "Dense"
        units = 8

        [[layers]]
        class = "GRU"
        units = 4
    "#;

    let mut config = AppConfig::default();
    config.display_mut().set_show_connectors(true);
    let builder = DiagramBuilder::new(config.clone());
    let layers = builder.load_model(source, ModelFormat::Toml).unwrap();
    assert!(matches!(
        builder.compose(&layers),
        Err(NetsketchError::Connector(_))
    ));

    config
        .display_mut()
        .set_connector_mismatch(MismatchPolicy::Skip);
    let diagram = DiagramBuilder::new(config).compose(&layers).unwrap();
    assert_eq!(diagram.connector_groups(), 1);
}

#[test]
fn test_empty_model() {
    let builder = DiagramBuilder::default();
    let layers = builder.load_model("layers = []", ModelFormat::Toml).unwrap();
    assert!(matches!(
        builder.render_svg(&layers),
        Err(NetsketchError::EmptyModel)
    ));
}

#[test]
fn test_zero_units_is_rejected() {
    let source = r#"
        [[layers]]
        class = "Dense"
        name = "head"
        units = 0
    "#;
    let builder = DiagramBuilder::default();
    let layers = builder.load_model(source, ModelFormat::Toml).unwrap();
    let err = builder.compose(&layers).unwrap_err();
    assert!(matches!(
        err,
        NetsketchError::Descriptor(DescriptorError::NonPositive { .. })
    ));
}

#[test]
fn test_missing_units_fails_on_load() {
    let source = r#"
        [[layers]]
        class = "Dense"
    "#;
    let err = DiagramBuilder::default()
        .load_model(source, ModelFormat::Toml)
        .unwrap_err();
    assert!(matches!(
        err,
        NetsketchError::Descriptor(DescriptorError::MissingAttribute {
            attribute: "units",
            ..
        })
    ));
}

#[test]
fn test_palette_changes_fills() {
    let source = "[[layers]]\nclass = \"Dense\"\nunits = 4\n";
    let default_svg = {
        let builder = DiagramBuilder::default();
        let layers = builder.load_model(source, ModelFormat::Toml).unwrap();
        builder.render_svg(&layers).unwrap()
    };

    let mut config = AppConfig::default();
    config.style_mut().set_palette_name(PaletteName::Red);
    let builder = DiagramBuilder::new(config);
    let layers = builder.load_model(source, ModelFormat::Toml).unwrap();
    let red_svg = builder.render_svg(&layers).unwrap();

    assert_ne!(default_svg, red_svg);
}

#[test]
fn test_invalid_background_is_config_error() {
    let mut config = AppConfig::default();
    config.style_mut().set_background_color("nope");
    let builder = DiagramBuilder::new(config);
    let layers = builder
        .load_model("[[layers]]\nclass = \"Flatten\"\n", ModelFormat::Toml)
        .unwrap();
    assert!(matches!(
        builder.compose(&layers),
        Err(NetsketchError::Config(_))
    ));
}
