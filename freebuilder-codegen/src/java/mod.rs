//! Java syntax nodes rendered through [`CodeBuilder`](crate::builder::CodeBuilder).

mod body;
mod class;
mod field;
mod file;
mod method;
mod shortener;

pub use body::Body;
pub use class::{ClassKind, ClassSpec, Member};
pub use field::FieldSpec;
pub use file::JavaFile;
pub use method::{MethodSpec, ParamSpec};
pub use shortener::TypeShortener;

use freebuilder_model::Visibility;

/// Modifier keywords in canonical order, with a trailing space when any
/// are present.
pub(crate) fn modifier_prefix(
    visibility: Visibility,
    is_abstract: bool,
    is_static: bool,
    is_final: bool,
) -> String {
    let mut prefix = String::new();
    let keywords = [
        (true, visibility.keyword()),
        (is_abstract, "abstract"),
        (is_static, "static"),
        (is_final, "final"),
    ];
    for (present, keyword) in keywords {
        if present && !keyword.is_empty() {
            prefix.push_str(keyword);
            prefix.push(' ');
        }
    }
    prefix
}
