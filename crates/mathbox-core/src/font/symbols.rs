//! Named math symbols.
//!
//! Maps the names the parser hands over (`sum`, `lbrack`, `rightarrow`)
//! to a code point and a spacing class. Single-character delimiters have
//! aliases so `(` and `lbrack` resolve to the same symbol.

use crate::types::{AtomType, LimitsType};

/// A named symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub name: &'static str,
    pub code: char,
    pub atom_type: AtomType,
    pub limits: LimitsType,
}

const fn sym(name: &'static str, code: char, atom_type: AtomType) -> Symbol {
    Symbol {
        name,
        code,
        atom_type,
        limits: LimitsType::NoLimits,
    }
}

const fn big(name: &'static str, code: char, limits: LimitsType) -> Symbol {
    Symbol {
        name,
        code,
        atom_type: AtomType::BigOperator,
        limits,
    }
}

use AtomType::{
    Accent, BinaryOperator as Bin, Closing, Opening, Ordinary as Ord, Punctuation, Relation as Rel,
};
use LimitsType::{NoLimits, Normal};

// Sorted by name; `get` binary-searches.
static SYMBOLS: &[Symbol] = &[
    sym("Downarrow", '\u{21d3}', Rel),
    sym("Leftarrow", '\u{21d0}', Rel),
    sym("Leftrightarrow", '\u{21d4}', Rel),
    sym("Rightarrow", '\u{21d2}', Rel),
    sym("Uparrow", '\u{21d1}', Rel),
    sym("Vert", '\u{2016}', Ord),
    sym("acute", '\u{0301}', Accent),
    sym("ast", '\u{2217}', Bin),
    sym("backslash", '\\', Ord),
    sym("bar", '\u{0304}', Accent),
    big("bigcap", '\u{22c2}', Normal),
    big("bigcup", '\u{22c3}', Normal),
    big("bigoplus", '\u{2a01}', Normal),
    big("bigotimes", '\u{2a02}', Normal),
    big("bigvee", '\u{22c1}', Normal),
    big("bigwedge", '\u{22c0}', Normal),
    sym("breve", '\u{0306}', Accent),
    sym("cdot", '\u{22c5}', Bin),
    sym("cdotp", '\u{22c5}', Punctuation),
    sym("cdots", '\u{22ef}', Ord),
    sym("check", '\u{030c}', Accent),
    sym("colon", ':', Punctuation),
    sym("comma", ',', Punctuation),
    big("coprod", '\u{2210}', Normal),
    sym("ddot", '\u{0308}', Accent),
    sym("ddots", '\u{22f1}', Ord),
    sym("div", '\u{00f7}', Bin),
    sym("dot", '\u{0307}', Accent),
    sym("downarrow", '\u{2193}', Rel),
    sym("equals", '=', Rel),
    sym("geq", '\u{2265}', Rel),
    sym("grave", '\u{0300}', Accent),
    sym("gt", '>', Rel),
    sym("hat", '\u{0302}', Accent),
    big("iint", '\u{222c}', NoLimits),
    big("int", '\u{222b}', NoLimits),
    sym("langle", '\u{27e8}', Opening),
    sym("lbrace", '{', Opening),
    sym("lbrack", '(', Opening),
    sym("lceil", '\u{2308}', Opening),
    sym("ldotp", '.', Punctuation),
    sym("ldots", '\u{2026}', Ord),
    sym("leftarrow", '\u{2190}', Rel),
    sym("leftrightarrow", '\u{2194}', Rel),
    sym("leq", '\u{2264}', Rel),
    sym("lfloor", '\u{230a}', Opening),
    sym("lgroup", '\u{27ee}', Opening),
    sym("lsqbrack", '[', Opening),
    sym("lt", '<', Rel),
    sym("minus", '\u{2212}', Bin),
    sym("mp", '\u{2213}', Bin),
    sym("neq", '\u{2260}', Rel),
    sym("normaldot", '.', Ord),
    big("oint", '\u{222e}', NoLimits),
    sym("overbrace", '\u{23de}', Ord),
    sym("overbracket", '\u{23b4}', Ord),
    sym("overparen", '\u{23dc}', Ord),
    sym("plus", '+', Bin),
    sym("pm", '\u{00b1}', Bin),
    big("prod", '\u{220f}', Normal),
    sym("rangle", '\u{27e9}', Closing),
    sym("rbrace", '}', Closing),
    sym("rbrack", ')', Closing),
    sym("rceil", '\u{2309}', Closing),
    sym("rfloor", '\u{230b}', Closing),
    sym("rgroup", '\u{27ef}', Closing),
    sym("rightarrow", '\u{2192}', Rel),
    sym("rsqbrack", ']', Closing),
    sym("semicolon", ';', Punctuation),
    sym("setminus", '\u{2216}', Bin),
    sym("slash", '/', Ord),
    sym("sqrt", '\u{221a}', Ord),
    big("sum", '\u{2211}', Normal),
    sym("tilde", '\u{0303}', Accent),
    sym("times", '\u{00d7}', Bin),
    sym("underbrace", '\u{23df}', Ord),
    sym("underbracket", '\u{23b5}', Ord),
    sym("underparen", '\u{23dd}', Ord),
    sym("uparrow", '\u{2191}', Rel),
    sym("updownarrow", '\u{2195}', Rel),
    sym("vdots", '\u{22ee}', Ord),
    sym("vec", '\u{20d7}', Accent),
    sym("vert", '|', Ord),
    sym("widehat", '\u{0302}', Accent),
    sym("widetilde", '\u{0303}', Accent),
];

/// Look up a symbol by name. A single character is first resolved through
/// the delimiter aliases.
pub fn get(name: &str) -> Option<&'static Symbol> {
    let name = char_alias(name).unwrap_or(name);
    SYMBOLS
        .binary_search_by(|s| s.name.cmp(name))
        .ok()
        .map(|i| &SYMBOLS[i])
}

fn char_alias(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(match c {
        '(' => "lbrack",
        ')' => "rbrack",
        '[' => "lsqbrack",
        ']' => "rsqbrack",
        '{' => "lbrace",
        '}' => "rbrace",
        '<' => "langle",
        '>' => "rangle",
        '|' => "vert",
        '/' => "slash",
        '\\' => "backslash",
        '.' => "normaldot",
        '+' => "plus",
        '-' => "minus",
        '=' => "equals",
        ',' => "comma",
        ';' => "semicolon",
        ':' => "colon",
        _ => return None,
    })
}
