//! Attribute write policy shared by rendering and patching.

use crate::error::HostError;
use crate::host::HostTree;

/// Write one attribute onto a live node.
///
/// - `style` replaces the whole inline declaration.
/// - `value` on `input`/`textarea` writes the live value, so a control the
///   user already edited shows the new value.
/// - anything else is a plain attribute.
pub fn apply_attribute<H: HostTree>(
    host: &mut H,
    node: H::Handle,
    key: &str,
    value: &str,
) -> Result<(), HostError> {
    match key {
        "style" => host.set_style_text(node, value),
        "value" if is_value_control(host.tag_name(node)?) => host.set_value(node, value),
        _ => host.set_attribute(node, key, value),
    }
}

/// Removal never special-cases `style` or `value`.
pub fn remove_attribute<H: HostTree>(
    host: &mut H,
    node: H::Handle,
    key: &str,
) -> Result<(), HostError> {
    host.remove_attribute(node, key)
}

fn is_value_control(name: Option<&str>) -> bool {
    name.is_some_and(|name| {
        name.eq_ignore_ascii_case("input") || name.eq_ignore_ascii_case("textarea")
    })
}
