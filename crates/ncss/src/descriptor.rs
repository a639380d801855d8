//! Runtime value descriptors.
//!
//! A descriptor is a compiler-emitted, not yet resolved CSS value: a literal
//! (`'red'`, `12`), an array of descriptors, or a function call such as
//! `{ name: "var", arguments: ["--primary"] }`. Function names are mapped
//! once, at construction, to a closed [`FunctionKind`]; names the runtime does
//! not understand become [`FunctionKind::Unknown`] and are later printed back
//! as `name(args)`.

use phf::phf_map;

/// A compiled, unresolved value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Descriptor {
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Descriptor>),
    Function(FunctionCall),
}

impl Descriptor {
    /// Shorthand for a function descriptor.
    pub fn function(name: &str, args: impl IntoIterator<Item = Descriptor>) -> Self {
        Descriptor::Function(FunctionCall::new(name, args.into_iter().collect()))
    }

    /// `var(name)` or `var(name, fallback)`.
    pub fn var(name: &str, fallback: Option<Descriptor>) -> Self {
        let mut args = vec![Descriptor::from(name)];
        args.extend(fallback);
        Descriptor::function("var", args)
    }

    pub fn as_function(&self) -> Option<&FunctionCall> {
        match self {
            Descriptor::Function(call) => Some(call),
            _ => None,
        }
    }
}

impl From<f64> for Descriptor {
    fn from(n: f64) -> Self {
        Descriptor::Number(n)
    }
}

impl From<i32> for Descriptor {
    fn from(n: i32) -> Self {
        Descriptor::Number(n as f64)
    }
}

impl From<bool> for Descriptor {
    fn from(b: bool) -> Self {
        Descriptor::Bool(b)
    }
}

impl From<&str> for Descriptor {
    fn from(s: &str) -> Self {
        Descriptor::String(s.to_string())
    }
}

impl From<String> for Descriptor {
    fn from(s: String) -> Self {
        Descriptor::String(s)
    }
}

impl From<Vec<Descriptor>> for Descriptor {
    fn from(items: Vec<Descriptor>) -> Self {
        Descriptor::Array(items)
    }
}

/// A function call descriptor. The kind is derived from the name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "FunctionCallRepr", into = "FunctionCallRepr")
)]
pub struct FunctionCall {
    name: String,
    kind: FunctionKind,
    args: Vec<Descriptor>,
}

impl FunctionCall {
    pub fn new(name: &str, args: Vec<Descriptor>) -> Self {
        Self {
            name: name.to_string(),
            kind: FunctionKind::from_name(name),
            args,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn args(&self) -> &[Descriptor] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&Descriptor> {
        self.args.get(index)
    }
}

/// Wire shape of a function descriptor: `{ "name": ..., "arguments": [...] }`.
#[cfg(feature = "serde")]
#[doc(hidden)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct FunctionCallRepr {
    name: String,
    #[serde(default)]
    arguments: Vec<Descriptor>,
}

#[cfg(feature = "serde")]
impl From<FunctionCallRepr> for FunctionCall {
    fn from(repr: FunctionCallRepr) -> Self {
        FunctionCall::new(&repr.name, repr.arguments)
    }
}

#[cfg(feature = "serde")]
impl From<FunctionCall> for FunctionCallRepr {
    fn from(call: FunctionCall) -> Self {
        FunctionCallRepr {
            name: call.name,
            arguments: call.args,
        }
    }
}

/// Every function the resolver handles specially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Var,
    Calc,
    Min,
    Max,
    Clamp,
    Vh,
    Vw,
    Em,
    Rem,
    /// Relative to the component's own laid-out height.
    Rnh,
    /// Relative to the component's own laid-out width.
    Rnw,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    Hwb,
    HairlineWidth,
    PlatformColor,
    PlatformSelect,
    GetPixelSizeForLayoutSize,
    FontScale,
    PixelScale,
    PixelScaleSelect,
    FontScaleSelect,
    RoundToNearestPixel,
    /// A single transform entry, e.g. `translateX(10)`.
    Transform(TransformKey),
    /// Bare `translate(x, y)`; always expands to an X/Y pair.
    Translate,
    Unknown,
}

static FUNCTION_KINDS: phf::Map<&'static str, FunctionKind> = phf_map! {
    "var" => FunctionKind::Var,
    "calc" => FunctionKind::Calc,
    "min" => FunctionKind::Min,
    "max" => FunctionKind::Max,
    "clamp" => FunctionKind::Clamp,
    "vh" => FunctionKind::Vh,
    "vw" => FunctionKind::Vw,
    "em" => FunctionKind::Em,
    "rem" => FunctionKind::Rem,
    "rnh" => FunctionKind::Rnh,
    "rnw" => FunctionKind::Rnw,
    "rgb" => FunctionKind::Rgb,
    "rgba" => FunctionKind::Rgba,
    "hsl" => FunctionKind::Hsl,
    "hsla" => FunctionKind::Hsla,
    "hwb" => FunctionKind::Hwb,
    "hairlineWidth" => FunctionKind::HairlineWidth,
    "platformColor" => FunctionKind::PlatformColor,
    "platformSelect" => FunctionKind::PlatformSelect,
    "getPixelSizeForLayoutSize" => FunctionKind::GetPixelSizeForLayoutSize,
    "fontScale" => FunctionKind::FontScale,
    "pixelScale" => FunctionKind::PixelScale,
    "pixelScaleSelect" => FunctionKind::PixelScaleSelect,
    "fontScaleSelect" => FunctionKind::FontScaleSelect,
    "roundToNearestPixel" => FunctionKind::RoundToNearestPixel,
    "translate" => FunctionKind::Translate,
    "translateX" => FunctionKind::Transform(TransformKey::TranslateX),
    "translateY" => FunctionKind::Transform(TransformKey::TranslateY),
    "scale" => FunctionKind::Transform(TransformKey::Scale),
    "scaleX" => FunctionKind::Transform(TransformKey::ScaleX),
    "scaleY" => FunctionKind::Transform(TransformKey::ScaleY),
    "rotate" => FunctionKind::Transform(TransformKey::Rotate),
    "rotateX" => FunctionKind::Transform(TransformKey::RotateX),
    "rotateY" => FunctionKind::Transform(TransformKey::RotateY),
    "rotateZ" => FunctionKind::Transform(TransformKey::RotateZ),
    "skewX" => FunctionKind::Transform(TransformKey::SkewX),
    "skewY" => FunctionKind::Transform(TransformKey::SkewY),
    "perspective" => FunctionKind::Transform(TransformKey::Perspective),
    "matrix" => FunctionKind::Transform(TransformKey::Matrix),
    "transformOrigin" => FunctionKind::Transform(TransformKey::TransformOrigin),
};

impl FunctionKind {
    pub fn from_name(name: &str) -> Self {
        FUNCTION_KINDS
            .get(name)
            .copied()
            .unwrap_or(FunctionKind::Unknown)
    }
}

/// Keys that live inside a style's `transform` array rather than at the top
/// level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKey {
    TranslateX,
    TranslateY,
    Scale,
    ScaleX,
    ScaleY,
    Rotate,
    RotateX,
    RotateY,
    RotateZ,
    SkewX,
    SkewY,
    Perspective,
    Matrix,
    TransformOrigin,
}

impl TransformKey {
    pub fn as_str(self) -> &'static str {
        match self {
            TransformKey::TranslateX => "translateX",
            TransformKey::TranslateY => "translateY",
            TransformKey::Scale => "scale",
            TransformKey::ScaleX => "scaleX",
            TransformKey::ScaleY => "scaleY",
            TransformKey::Rotate => "rotate",
            TransformKey::RotateX => "rotateX",
            TransformKey::RotateY => "rotateY",
            TransformKey::RotateZ => "rotateZ",
            TransformKey::SkewX => "skewX",
            TransformKey::SkewY => "skewY",
            TransformKey::Perspective => "perspective",
            TransformKey::Matrix => "matrix",
            TransformKey::TransformOrigin => "transformOrigin",
        }
    }

    /// Looks up a property name; `None` if it is a plain style property.
    pub fn from_property(property: &str) -> Option<Self> {
        match FunctionKind::from_name(property) {
            FunctionKind::Transform(key) => Some(key),
            _ => None,
        }
    }
}

/// True for properties written into the `transform` array.
pub fn is_transform_key(property: &str) -> bool {
    TransformKey::from_property(property).is_some()
}
