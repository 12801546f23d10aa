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

//! Decompilation ("unparsing") of novella script statement trees back into
//! script source text. The statement tree arrives already built by the
//! script loader; [`unparse`] streams equivalent source to a sink.

mod ast;
mod unparse;

pub use crate::ast::{
    AtlBlock, DEFAULT_LAYER, Expr, ImageSpec, ImageTarget, JumpTarget, Param, ParamList, Stmt,
};
pub use crate::unparse::{
    AtlRenderer, BlockText, Diagnostic, ExprRenderer, SourceText, Unparse, UnparseError, unparse,
};
