// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! The statement tree recovered from a compiled script bundle, as handed to
//! the unparser by the loader. Nodes are plain owned data and are never
//! mutated during rendering.

/// The layer displayables land on when a statement carries no `onlayer`
/// clause. Rendering omits the clause for this layer.
pub const DEFAULT_LAYER: &str = "master";

/// An expression fragment, pre-rendered to source text by the loader. The
/// unparser never looks inside it.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Expr(pub String);

impl Expr {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr(s)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr(s.to_string())
    }
}

/// The body of a transform block attached to a `show`, pre-rendered one
/// sub-statement per line. Lines carry their own relative indentation;
/// rendering re-indents the whole body to the block's depth.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct AtlBlock(pub String);

impl From<String> for AtlBlock {
    fn from(s: String) -> Self {
        AtlBlock(s)
    }
}

impl From<&str> for AtlBlock {
    fn from(s: &str) -> Self {
        AtlBlock(s.to_string())
    }
}

/// A single formal parameter of a label.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Param {
    pub name: String,
    pub default: Option<Expr>,
}

/// Ordered parameter list of a label.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct ParamList(pub Vec<Param>);

/// Where a `jump` lands: a literal label name, or an expression evaluated at
/// runtime to produce one.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum JumpTarget {
    Name(String),
    Dynamic(Expr),
}

/// What an image statement displays. A spec names an image by its ordered
/// name components, or computes one at runtime; the two are mutually
/// exclusive by construction.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum ImageTarget {
    Name(Vec<String>),
    Expression(Expr),
}

/// Composite descriptor of a displayable reference, as used by `scene`,
/// `show` and `hide`.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct ImageSpec {
    pub target: ImageTarget,
    /// `as` alias.
    pub alias: Option<String>,
    /// `at` transform list.
    pub at_list: Vec<Expr>,
    /// `onlayer` target. [`DEFAULT_LAYER`] suppresses the clause.
    pub layer: String,
    /// `zorder` value.
    pub zorder: Option<Expr>,
    /// `behind` tag list.
    pub behind: Vec<String>,
}

impl ImageSpec {
    /// A spec naming an image by its components, with no display clauses.
    pub fn named(parts: Vec<String>) -> Self {
        Self {
            target: ImageTarget::Name(parts),
            alias: None,
            at_list: vec![],
            layer: DEFAULT_LAYER.to_string(),
            zorder: None,
            behind: vec![],
        }
    }

    /// A spec whose displayable is computed at runtime, with no display
    /// clauses.
    pub fn expression(expr: Expr) -> Self {
        Self {
            target: ImageTarget::Expression(expr),
            alias: None,
            at_list: vec![],
            layer: DEFAULT_LAYER.to_string(),
            zorder: None,
            behind: vec![],
        }
    }
}

/// A script statement. Closed over the kinds this build understands, plus an
/// explicit catch-all for anything else found in a bundle, carrying the
/// original kind name.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Stmt {
    Label {
        name: String,
        parameters: Option<ParamList>,
        block: Vec<Stmt>,
    },
    Say {
        who: Option<String>,
        what: String,
        with_: Option<Expr>,
    },
    Jump {
        target: JumpTarget,
    },
    Scene {
        imspec: Option<ImageSpec>,
        layer: String,
    },
    With {
        expr: Expr,
    },
    Show {
        imspec: ImageSpec,
        atl: Option<AtlBlock>,
    },
    Hide {
        imspec: ImageSpec,
    },
    Unknown {
        kind: String,
    },
}
