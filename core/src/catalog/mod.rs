//! Static description of every operation a node editor can offer.
//!
//! The catalog is what a sidebar lists: a name, a category, a one-line
//! description and the parameters the node form should show, each with its
//! default text. It carries no behavior; the [`Registry`](crate::Registry)
//! does. Every catalog entry names a registered operation and every
//! registered operation has an entry.

#[cfg(test)]
mod catalog_test;

use std::fmt;

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::params::Params;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Array Creation")]
    ArrayCreation,
    #[serde(rename = "Mathematical")]
    Mathematical,
    #[serde(rename = "Statistics")]
    Statistics,
    #[serde(rename = "Linear Algebra")]
    LinearAlgebra,
    #[serde(rename = "Array Manipulation")]
    ArrayManipulation,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::ArrayCreation => "Array Creation",
            Category::Mathematical => "Mathematical",
            Category::Statistics => "Statistics",
            Category::LinearAlgebra => "Linear Algebra",
            Category::ArrayManipulation => "Array Manipulation",
        }
    }

    /// Case-insensitive match on the label.
    pub fn from_label(label: &str) -> Option<Category> {
        let label = label.trim();
        [
            Category::ArrayCreation,
            Category::Mathematical,
            Category::Statistics,
            Category::LinearAlgebra,
            Category::ArrayManipulation,
        ]
        .into_iter()
        .find(|category| category.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a parameter's text is meant to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// A `[...]` literal.
    List,
    /// A `(...)` literal.
    Tuple,
    Number,
    String,
    /// A reference to another node's array.
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    /// Text prefilled in the node form. `None` leaves the field empty.
    pub default: Option<&'static str>,
}

impl ParamSpec {
    const fn required(name: &'static str, kind: ParamKind, default: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: Some(default),
        }
    }

    const fn optional(name: &'static str, kind: ParamKind, default: Option<&'static str>) -> Self {
        Self {
            name,
            kind,
            required: false,
            default,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub params: &'static [ParamSpec],
}

use ParamKind::{Array, List, Number, String as Text, Tuple};

const DTYPE: ParamSpec = ParamSpec::optional("dtype", Text, Some("float64"));
const AXIS: ParamSpec = ParamSpec::optional("axis", Number, None);

static CATALOG: [FunctionSpec; 15] = [
    FunctionSpec {
        name: "np.array",
        category: Category::ArrayCreation,
        description: "Create an array from a list or tuple",
        inputs: &["data", "dtype"],
        outputs: &["ndarray"],
        params: &[ParamSpec::required("data", List, "[1, 2, 3]"), DTYPE],
    },
    FunctionSpec {
        name: "np.zeros",
        category: Category::ArrayCreation,
        description: "Create array filled with zeros",
        inputs: &["shape", "dtype"],
        outputs: &["ndarray"],
        params: &[ParamSpec::required("shape", Tuple, "(3, 3)"), DTYPE],
    },
    FunctionSpec {
        name: "np.ones",
        category: Category::ArrayCreation,
        description: "Create array filled with ones",
        inputs: &["shape", "dtype"],
        outputs: &["ndarray"],
        params: &[ParamSpec::required("shape", Tuple, "(2, 2)"), DTYPE],
    },
    FunctionSpec {
        name: "np.linspace",
        category: Category::ArrayCreation,
        description: "Create evenly spaced numbers",
        inputs: &["start", "stop", "num"],
        outputs: &["ndarray"],
        params: &[
            ParamSpec::required("start", Number, "0"),
            ParamSpec::required("stop", Number, "10"),
            ParamSpec::optional("num", Number, Some("50")),
        ],
    },
    FunctionSpec {
        name: "np.add",
        category: Category::Mathematical,
        description: "Element-wise addition",
        inputs: &["x1", "x2"],
        outputs: &["ndarray"],
        params: &[
            ParamSpec::required("x1", Array, "array1"),
            ParamSpec::required("x2", Array, "array2"),
        ],
    },
    FunctionSpec {
        name: "np.multiply",
        category: Category::Mathematical,
        description: "Element-wise multiplication",
        inputs: &["x1", "x2"],
        outputs: &["ndarray"],
        params: &[
            ParamSpec::required("x1", Array, "array1"),
            ParamSpec::required("x2", Array, "array2"),
        ],
    },
    FunctionSpec {
        name: "np.sin",
        category: Category::Mathematical,
        description: "Trigonometric sine",
        inputs: &["x"],
        outputs: &["ndarray"],
        params: &[ParamSpec::required("x", Array, "array")],
    },
    FunctionSpec {
        name: "np.cos",
        category: Category::Mathematical,
        description: "Trigonometric cosine",
        inputs: &["x"],
        outputs: &["ndarray"],
        params: &[ParamSpec::required("x", Array, "array")],
    },
    FunctionSpec {
        name: "np.mean",
        category: Category::Statistics,
        description: "Compute arithmetic mean",
        inputs: &["a", "axis"],
        outputs: &["scalar/ndarray"],
        params: &[ParamSpec::required("a", Array, "array"), AXIS],
    },
    FunctionSpec {
        name: "np.std",
        category: Category::Statistics,
        description: "Compute standard deviation",
        inputs: &["a", "axis"],
        outputs: &["scalar/ndarray"],
        params: &[ParamSpec::required("a", Array, "array"), AXIS],
    },
    FunctionSpec {
        name: "np.sum",
        category: Category::Statistics,
        description: "Sum of array elements",
        inputs: &["a", "axis"],
        outputs: &["ndarray"],
        params: &[ParamSpec::required("a", Array, "array"), AXIS],
    },
    FunctionSpec {
        name: "np.dot",
        category: Category::LinearAlgebra,
        description: "Dot product of arrays",
        inputs: &["a", "b"],
        outputs: &["ndarray"],
        params: &[
            ParamSpec::required("a", Array, "array1"),
            ParamSpec::required("b", Array, "array2"),
        ],
    },
    FunctionSpec {
        name: "np.transpose",
        category: Category::LinearAlgebra,
        description: "Transpose array",
        inputs: &["a"],
        outputs: &["ndarray"],
        params: &[ParamSpec::required("a", Array, "array")],
    },
    FunctionSpec {
        name: "np.reshape",
        category: Category::ArrayManipulation,
        description: "Reshape array",
        inputs: &["a", "newshape"],
        outputs: &["ndarray"],
        params: &[
            ParamSpec::required("a", Array, "array"),
            ParamSpec::required("newshape", Tuple, "(2, 3)"),
        ],
    },
    FunctionSpec {
        name: "np.concatenate",
        category: Category::ArrayManipulation,
        description: "Join arrays along axis",
        inputs: &["arrays", "axis"],
        outputs: &["ndarray"],
        params: &[
            ParamSpec::required("arrays", List, "[array1, array2]"),
            ParamSpec::optional("axis", Number, Some("0")),
        ],
    },
];

static BY_NAME: Lazy<HashMap<&'static str, &'static FunctionSpec>> =
    Lazy::new(|| CATALOG.iter().map(|spec| (spec.name, spec)).collect());

/// Every entry, grouped by category.
pub fn catalog() -> &'static [FunctionSpec] {
    &CATALOG
}

pub fn lookup(name: &str) -> Option<&'static FunctionSpec> {
    BY_NAME.get(name).copied()
}

/// Categories in the order they first appear in the catalog.
pub fn categories() -> Vec<Category> {
    let mut seen = Vec::new();
    for spec in &CATALOG {
        if !seen.contains(&spec.category) {
            seen.push(spec.category);
        }
    }
    seen
}

/// The parameters a freshly dropped node starts with. Parameters without a
/// default are left out.
pub fn default_params(name: &str) -> Option<Params> {
    let spec = lookup(name)?;
    Some(
        spec.params
            .iter()
            .filter_map(|param| param.default.map(|default| (param.name, default)))
            .collect(),
    )
}
