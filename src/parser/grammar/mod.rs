//! Grammar modules for XQuery parsing
//!
//! This module contains the productions, organized by area:
//! - `module` - Modules, the prolog and its declarations
//! - `expressions` - ExprSingle dispatch and the operator precedence chain
//! - `flwor` - FLWOR, quantified, switch, typeswitch, if and try/catch
//! - `paths` - Path expressions, axis steps, node tests and postfix operators
//! - `primary` - Literals, variable references, function items, maps and arrays
//! - `constructors` - Direct and computed node constructors
//! - `types` - Sequence types, item types and kind tests
//! - `names` - QNames, EQNames and string literals
//! - `full_text`, `update`, `scripting` - The optional W3C extensions
//!
//! MarkLogic and Saxon syntax lives next to the base production it extends,
//! gated through [`Parser::supports`].
//!
//! Productions are free functions over the concrete [`Parser`] and return
//! [`Parsed`]; `Parsed::NoMatch` means no token was consumed.

mod constructors;
mod expressions;
mod flwor;
mod full_text;
mod module;
mod names;
mod paths;
mod primary;
mod scripting;
mod types;
mod update;

use crate::parser::errors::Message;
use crate::parser::syntax_kind::SyntaxKind;
use crate::parser::{Parsed, Parser};

use SyntaxKind::*;

pub(crate) use module::source_file;

use constructors::*;
use expressions::*;
use flwor::*;
use full_text::*;
use module::{annotation, param_list};
use names::*;
use paths::*;
use primary::*;
use scripting::*;
use types::*;
use update::*;
