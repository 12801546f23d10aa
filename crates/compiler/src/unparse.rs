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

use std::io::{self, Write};

use itertools::Itertools;
use tracing::warn;

use crate::ast::{
    AtlBlock, DEFAULT_LAYER, Expr, ImageSpec, ImageTarget, JumpTarget, ParamList, Stmt,
};
use novella_common::util::escape_string;

#[derive(Debug, thiserror::Error)]
pub enum UnparseError {
    #[error("sink write failure: {0}")]
    SinkWrite(#[from] io::Error),
}

/// Non-fatal events accumulated during a render and reported out of band, so
/// the primary output stream stays machine-parseable.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Diagnostic {
    UnknownNode { kind: String },
}

/// One block level of indentation.
const INDENT: &str = "    ";

fn indent(out: &mut dyn Write, level: usize) -> io::Result<()> {
    for _ in 0..level {
        out.write_all(INDENT.as_bytes())?;
    }
    Ok(())
}

/// Renders expression fragments on behalf of the engine. Statements carry
/// their expressions pre-rendered by the loader; implementations decide how
/// that text reaches the sink.
pub trait ExprRenderer {
    fn write_expr(&self, expr: &Expr, out: &mut dyn Write) -> io::Result<()>;
}

/// Writes the fragment exactly as the loader rendered it.
#[derive(Debug, Default)]
pub struct SourceText;

impl ExprRenderer for SourceText {
    fn write_expr(&self, expr: &Expr, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(expr.as_str().as_bytes())
    }
}

/// Renders the body of a `show` statement's transform block.
pub trait AtlRenderer {
    fn write_block(&self, block: &AtlBlock, level: usize, out: &mut dyn Write) -> io::Result<()>;
}

/// Re-indents the opaque pre-rendered block body to the block's depth,
/// keeping each line's own relative indentation.
#[derive(Debug, Default)]
pub struct BlockText;

impl AtlRenderer for BlockText {
    fn write_block(&self, block: &AtlBlock, level: usize, out: &mut dyn Write) -> io::Result<()> {
        for line in block.0.lines() {
            indent(out, level)?;
            out.write_all(line.as_bytes())?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Walks a statement tree depth-first and streams script source to a sink.
/// Stateless between statements apart from the diagnostics it accumulates.
pub struct Unparse<'a> {
    exprs: &'a dyn ExprRenderer,
    atl: &'a dyn AtlRenderer,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Unparse<'a> {
    pub fn new(exprs: &'a dyn ExprRenderer, atl: &'a dyn AtlRenderer) -> Self {
        Self {
            exprs,
            atl,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Render each statement in order at the given block level. Children of
    /// block-bearing statements always render at `level + 1`.
    pub fn write_stmts(
        &mut self,
        stmts: &[Stmt],
        level: usize,
        out: &mut dyn Write,
    ) -> Result<(), UnparseError> {
        for stmt in stmts {
            indent(out, level)?;
            self.write_stmt(stmt, level, out)?;
        }
        Ok(())
    }

    fn write_stmt(
        &mut self,
        stmt: &Stmt,
        level: usize,
        out: &mut dyn Write,
    ) -> Result<(), UnparseError> {
        match stmt {
            Stmt::Label {
                name,
                parameters,
                block,
            } => self.write_label(name, parameters.as_ref(), block, level, out),
            Stmt::Say { who, what, with_ } => {
                self.write_say(who.as_deref(), what, with_.as_ref(), out)
            }
            Stmt::Jump { target } => self.write_jump(target, out),
            Stmt::Scene { imspec, layer } => self.write_scene(imspec.as_ref(), layer, out),
            Stmt::With { expr } => self.write_with(expr, out),
            Stmt::Show { imspec, atl } => self.write_show(imspec, atl.as_ref(), level, out),
            Stmt::Hide { imspec } => self.write_hide(imspec, out),
            Stmt::Unknown { kind } => self.write_unknown(kind, out),
        }
    }

    fn write_label(
        &mut self,
        name: &str,
        parameters: Option<&ParamList>,
        block: &[Stmt],
        level: usize,
        out: &mut dyn Write,
    ) -> Result<(), UnparseError> {
        write!(out, "label {name}")?;
        if let Some(params) = parameters {
            out.write_all(b"(")?;
            self.write_params(params, out)?;
            out.write_all(b")")?;
        }
        out.write_all(b":\n")?;
        self.write_stmts(block, level + 1, out)
    }

    fn write_params(&self, params: &ParamList, out: &mut dyn Write) -> Result<(), UnparseError> {
        for (i, param) in params.0.iter().enumerate() {
            if i > 0 {
                out.write_all(b", ")?;
            }
            out.write_all(param.name.as_bytes())?;
            if let Some(default) = &param.default {
                out.write_all(b"=")?;
                self.exprs.write_expr(default, out)?;
            }
        }
        Ok(())
    }

    fn write_say(
        &mut self,
        who: Option<&str>,
        what: &str,
        with_: Option<&Expr>,
        out: &mut dyn Write,
    ) -> Result<(), UnparseError> {
        if let Some(who) = who {
            write!(out, "{who} ")?;
        }
        write!(out, "\"{}\"", escape_string(what))?;
        if let Some(with_) = with_ {
            out.write_all(b" with ")?;
            self.exprs.write_expr(with_, out)?;
        }
        out.write_all(b"\n")?;
        Ok(())
    }

    fn write_jump(&mut self, target: &JumpTarget, out: &mut dyn Write) -> Result<(), UnparseError> {
        out.write_all(b"jump ")?;
        match target {
            JumpTarget::Name(name) => out.write_all(name.as_bytes())?,
            JumpTarget::Dynamic(expr) => {
                out.write_all(b"expression ")?;
                self.exprs.write_expr(expr, out)?;
            }
        }
        out.write_all(b"\n")?;
        Ok(())
    }

    fn write_scene(
        &mut self,
        imspec: Option<&ImageSpec>,
        layer: &str,
        out: &mut dyn Write,
    ) -> Result<(), UnparseError> {
        out.write_all(b"scene")?;
        match imspec {
            Some(imspec) => {
                // The image spec owns the onlayer clause; the statement's own
                // layer only renders for a bare scene.
                out.write_all(b" ")?;
                self.write_imspec(imspec, out)?;
            }
            None => {
                if layer != DEFAULT_LAYER {
                    write!(out, " onlayer {layer}")?;
                }
            }
        }
        out.write_all(b"\n")?;
        Ok(())
    }

    fn write_with(&mut self, expr: &Expr, out: &mut dyn Write) -> Result<(), UnparseError> {
        out.write_all(b"with ")?;
        self.exprs.write_expr(expr, out)?;
        out.write_all(b"\n")?;
        Ok(())
    }

    fn write_show(
        &mut self,
        imspec: &ImageSpec,
        atl: Option<&AtlBlock>,
        level: usize,
        out: &mut dyn Write,
    ) -> Result<(), UnparseError> {
        out.write_all(b"show ")?;
        self.write_imspec(imspec, out)?;

        // A trailing `with` never appears here; the loader splits it into a
        // separate statement.

        match atl {
            Some(atl) => {
                out.write_all(b":\n")?;
                self.atl.write_block(atl, level + 1, out)?;
            }
            None => out.write_all(b"\n")?,
        }
        Ok(())
    }

    fn write_hide(&mut self, imspec: &ImageSpec, out: &mut dyn Write) -> Result<(), UnparseError> {
        out.write_all(b"hide ")?;
        self.write_imspec(imspec, out)?;
        out.write_all(b"\n")?;
        Ok(())
    }

    fn write_unknown(&mut self, kind: &str, out: &mut dyn Write) -> Result<(), UnparseError> {
        warn!("unknown statement kind: {kind}");
        self.diagnostics.push(Diagnostic::UnknownNode {
            kind: kind.to_string(),
        });
        writeln!(out, "<<<UNKNOWN NODE {kind}>>>")?;
        Ok(())
    }

    /// Clause order is fixed: target, at, as, behind, onlayer, zorder. The
    /// grammar accepts it and round-trip comparisons depend on it.
    fn write_imspec(&self, imspec: &ImageSpec, out: &mut dyn Write) -> Result<(), UnparseError> {
        match &imspec.target {
            ImageTarget::Name(parts) => out.write_all(parts.iter().join(" ").as_bytes())?,
            ImageTarget::Expression(expr) => {
                out.write_all(b"expression ")?;
                self.exprs.write_expr(expr, out)?;
            }
        }

        if !imspec.at_list.is_empty() {
            out.write_all(b" at ")?;
            for (i, expr) in imspec.at_list.iter().enumerate() {
                if i > 0 {
                    out.write_all(b", ")?;
                }
                self.exprs.write_expr(expr, out)?;
            }
        }

        if let Some(alias) = &imspec.alias {
            write!(out, " as {alias}")?;
        }

        if !imspec.behind.is_empty() {
            write!(out, " behind {}", imspec.behind.iter().join(", "))?;
        }

        if imspec.layer != DEFAULT_LAYER {
            write!(out, " onlayer {}", imspec.layer)?;
        }

        // zorder isn't in the language docs, but the parser accepts it.
        if let Some(zorder) = &imspec.zorder {
            out.write_all(b" zorder ")?;
            self.exprs.write_expr(zorder, out)?;
        }
        Ok(())
    }
}

/// Render a statement sequence to the sink, starting at block level zero.
/// Output is streamed in document order; a sink write failure aborts the
/// remaining walk immediately and partial output is the caller's to keep or
/// discard. On success, returns the diagnostics accumulated along the way.
pub fn unparse<W: Write>(stmts: &[Stmt], out: &mut W) -> Result<Vec<Diagnostic>, UnparseError> {
    let mut unparse = Unparse::new(&SourceText, &BlockText);
    unparse.write_stmts(stmts, 0, out)?;
    Ok(unparse.into_diagnostics())
}
