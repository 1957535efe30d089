//! Render catalog formula markup for the terminal.
//!
//! Formulas are stored in a small TeX-like markup: `_` starts a subscript
//! and `^` a superscript, each applying to the next character or to a
//! `{...}` group. `Cr_2O_7^{2-}` renders as `Cr₂O₇²⁻`.

#[derive(Clone, Copy, PartialEq)]
enum Script {
    Sub,
    Super,
}

fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        '(' => '₍',
        ')' => '₎',
        _ => return None,
    })
}

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '(' => '⁽',
        ')' => '⁾',
        _ => return None,
    })
}

fn shift(c: char, script: Script) -> char {
    let mapped = match script {
        Script::Sub => subscript(c),
        Script::Super => superscript(c),
    };
    mapped.unwrap_or(c)
}

/// Convert markup into Unicode sub/superscripts. Characters with no
/// Unicode form are kept as they are.
pub fn to_unicode(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut chars = markup.chars();

    while let Some(c) = chars.next() {
        let script = match c {
            '_' => Script::Sub,
            '^' => Script::Super,
            other => {
                out.push(other);
                continue;
            }
        };

        match chars.next() {
            Some('{') => {
                for inner in chars.by_ref() {
                    if inner == '}' {
                        break;
                    }
                    out.push(shift(inner, script));
                }
            }
            Some(single) => out.push(shift(single, script)),
            None => out.push(c),
        }
    }

    out
}
