//! Process-wide name tables.
//!
//! Four tables back the name lookups done while building atoms: named
//! colors (the dvips names understood by `\color`), predefined formulas,
//! user macros (`\newcommand`) and column-specifier aliases
//! (`\newcolumntype`). Built-in entries are loaded once; user entries live
//! beside them and are dropped by [`shutdown`].
//!
//! Every accessor initialises the tables on first use, so [`init`] only
//! moves that cost to a known point. Readers take a shared lock and never
//! observe a half-built table.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;
use mathbox_types::color::{Color, parse_color_literal};
use mathbox_types::error::{MathBoxError, Result};

/// A `\newcommand` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    /// Number of arguments, including the optional one.
    pub args: usize,
    /// Replacement text with `#1`..`#9` placeholders.
    pub code: String,
    /// Default for an optional first argument.
    pub default: Option<String>,
}

impl Macro {
    /// Substitute `args` into the replacement text. When the macro has an
    /// optional first argument, `optional` (or the default) fills `#1` and
    /// the mandatory arguments start at `#2`.
    pub fn expand(&self, optional: Option<&str>, args: &[&str]) -> String {
        let mut code = self.code.clone();
        let mut offset = 0;
        if let Some(first) = optional.or(self.default.as_deref()) {
            code = code.replace("#1", first);
            offset = 1;
        }
        // Highest index first so `#1` never eats the prefix of `#10`.
        for (i, arg) in args.iter().enumerate().rev() {
            code = code.replace(&format!("#{}", i + 1 + offset), arg);
        }
        code
    }
}

#[derive(Debug, Default)]
struct Tables {
    colors: HashMap<String, Color>,
    formulas: HashMap<String, String>,
    user_colors: HashMap<String, Color>,
    user_formulas: HashMap<String, String>,
    macros: HashMap<String, Macro>,
    column_types: HashMap<String, String>,
}

impl Tables {
    fn builtin() -> Self {
        let mut colors = HashMap::with_capacity(BASE_COLORS.len() + CMYK_COLORS.len());
        for &(name, color) in BASE_COLORS {
            colors.insert(name.to_string(), color);
        }
        for &(name, c, m, y, k) in CMYK_COLORS {
            colors.entry(name.to_string()).or_insert_with(|| Color::cmyk(c, m, y, k));
        }
        let formulas = PREDEFINED_FORMULAS
            .iter()
            .map(|&(name, src)| (name.to_string(), src.to_string()))
            .collect();
        Self {
            colors,
            formulas,
            ..Self::default()
        }
    }

    fn clear_user(&mut self) {
        self.user_colors.clear();
        self.user_formulas.clear();
        self.macros.clear();
        self.column_types.clear();
    }
}

static TABLES: OnceLock<RwLock<Tables>> = OnceLock::new();

fn tables() -> &'static RwLock<Tables> {
    TABLES.get_or_init(|| {
        let t = Tables::builtin();
        debug!(
            "registry loaded: {} colors, {} formulas",
            t.colors.len(),
            t.formulas.len()
        );
        RwLock::new(t)
    })
}

// A panic while holding the lock cannot leave a table half-written: every
// write is a single map operation.
fn read() -> RwLockReadGuard<'static, Tables> {
    tables().read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Tables> {
    tables().write().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Load the built-in tables. Calling it again is harmless.
pub fn init() -> Result<()> {
    let t = tables()
        .read()
        .map_err(|_| MathBoxError::Registry("tables poisoned".into()))?;
    debug!(
        "registry ready: {} colors, {} formulas, {} macros",
        t.colors.len() + t.user_colors.len(),
        t.formulas.len() + t.user_formulas.len(),
        t.macros.len()
    );
    Ok(())
}

/// Drop every user entry; built-in tables stay loaded.
pub fn shutdown() {
    let Some(lock) = TABLES.get() else {
        return;
    };
    let mut t = lock.write().unwrap_or_else(PoisonError::into_inner);
    debug!(
        "registry shutdown: dropping {} macros, {} column types",
        t.macros.len(),
        t.column_types.len()
    );
    t.clear_user();
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// Resolve a color name or literal. Names are case-insensitive; anything
/// else goes through [`parse_color_literal`].
pub fn color(name: &str) -> Option<Color> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    if !name.starts_with('#') && !name.contains([',', ';']) {
        let key = name.to_ascii_lowercase();
        let t = read();
        if let Some(c) = t.user_colors.get(&key).or_else(|| t.colors.get(&key)) {
            return Some(*c);
        }
    }
    parse_color_literal(name)
}

/// `\definecolor`: a user color shadowing any built-in of the same name.
pub fn define_color(name: &str, color: Color) {
    write().user_colors.insert(name.trim().to_ascii_lowercase(), color);
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

/// Source of a predefined formula such as `cdots` or `iff`.
pub fn formula(name: &str) -> Option<String> {
    let t = read();
    t.user_formulas.get(name).or_else(|| t.formulas.get(name)).cloned()
}

pub fn define_formula(name: &str, src: &str) {
    write().user_formulas.insert(name.to_string(), src.to_string());
}

// ---------------------------------------------------------------------------
// Macros
// ---------------------------------------------------------------------------

pub fn is_macro(name: &str) -> bool {
    read().macros.contains_key(name)
}

pub fn get_macro(name: &str) -> Option<Macro> {
    read().macros.get(name).cloned()
}

/// `\newcommand`. Fails if `name` is already defined.
pub fn new_command(name: &str, mac: Macro) -> Result<()> {
    let mut t = write();
    if t.macros.contains_key(name) {
        return Err(MathBoxError::Registry(format!(
            "command {name} already exists, use renewcommand"
        )));
    }
    debug!("newcommand {name} with {} args", mac.args);
    t.macros.insert(name.to_string(), mac);
    Ok(())
}

/// `\renewcommand`. Fails if `name` is not defined.
pub fn renew_command(name: &str, mac: Macro) -> Result<()> {
    let mut t = write();
    match t.macros.get_mut(name) {
        Some(slot) => {
            *slot = mac;
            Ok(())
        },
        None => Err(MathBoxError::Registry(format!(
            "command {name} is not defined, use newcommand"
        ))),
    }
}

/// `\newenvironment`: stored as a macro named `<name>@env` taking the body
/// as its last argument.
pub fn new_environment(name: &str, begin: &str, end: &str, args: usize) -> Result<()> {
    let code = format!("{begin} #{} {end}", args + 1);
    new_command(
        &format!("{name}@env"),
        Macro {
            args: args + 1,
            code,
            default: None,
        },
    )
}

// ---------------------------------------------------------------------------
// Column types
// ---------------------------------------------------------------------------

/// The column specification registered under `name`.
pub fn column_type(name: &str) -> Option<String> {
    let t = read();
    if t.column_types.is_empty() {
        return None;
    }
    t.column_types.get(name).cloned()
}

/// `\newcolumntype{name}{spec}`.
pub fn define_column_type(name: &str, spec: &str) {
    write().column_types.insert(name.to_string(), spec.to_string());
}

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

const BASE_COLORS: &[(&str, Color)] = &[
    ("black", Color::BLACK),
    ("white", Color::WHITE),
    ("red", Color::RED),
    ("green", Color::GREEN),
    ("blue", Color::BLUE),
    ("cyan", Color::CYAN),
    ("magenta", Color::MAGENTA),
    ("yellow", Color::YELLOW),
];

/// dvips names as CMYK fractions.
#[rustfmt::skip]
const CMYK_COLORS: &[(&str, f32, f32, f32, f32)] = &[
    ("greenyellow", 0.15, 0.0, 0.69, 0.0),
    ("goldenrod", 0.0, 0.10, 0.84, 0.0),
    ("dandelion", 0.0, 0.29, 0.84, 0.0),
    ("apricot", 0.0, 0.32, 0.52, 0.0),
    ("peach", 0.0, 0.50, 0.70, 0.0),
    ("melon", 0.0, 0.46, 0.50, 0.0),
    ("yelloworange", 0.0, 0.42, 1.0, 0.0),
    ("orange", 0.0, 0.61, 0.87, 0.0),
    ("burntorange", 0.0, 0.51, 1.0, 0.0),
    ("bittersweet", 0.0, 0.75, 1.0, 0.24),
    ("redorange", 0.0, 0.77, 0.87, 0.0),
    ("mahogany", 0.0, 0.85, 0.87, 0.35),
    ("maroon", 0.0, 0.87, 0.68, 0.32),
    ("brickred", 0.0, 0.89, 0.94, 0.28),
    ("orangered", 0.0, 1.0, 0.50, 0.0),
    ("rubinered", 0.0, 1.0, 0.13, 0.0),
    ("wildstrawberry", 0.0, 0.96, 0.39, 0.0),
    ("salmon", 0.0, 0.53, 0.38, 0.0),
    ("carnationpink", 0.0, 0.63, 0.0, 0.0),
    ("violetred", 0.0, 0.81, 0.0, 0.0),
    ("rhodamine", 0.0, 0.82, 0.0, 0.0),
    ("mulberry", 0.34, 0.90, 0.0, 0.02),
    ("redviolet", 0.07, 0.90, 0.0, 0.34),
    ("fuchsia", 0.47, 0.91, 0.0, 0.08),
    ("lavender", 0.0, 0.48, 0.0, 0.0),
    ("thistle", 0.12, 0.59, 0.0, 0.0),
    ("orchid", 0.32, 0.64, 0.0, 0.0),
    ("darkorchid", 0.40, 0.80, 0.20, 0.0),
    ("purple", 0.45, 0.86, 0.0, 0.0),
    ("plum", 0.50, 1.0, 0.0, 0.0),
    ("violet", 0.79, 0.88, 0.0, 0.0),
    ("royalpurple", 0.75, 0.90, 0.0, 0.0),
    ("blueviolet", 0.86, 0.91, 0.0, 0.04),
    ("periwinkle", 0.57, 0.55, 0.0, 0.0),
    ("cadetblue", 0.62, 0.57, 0.23, 0.0),
    ("cornflowerblue", 0.65, 0.13, 0.0, 0.0),
    ("midnightblue", 0.98, 0.13, 0.0, 0.43),
    ("navyblue", 0.94, 0.54, 0.0, 0.0),
    ("royalblue", 1.0, 0.50, 0.0, 0.0),
    ("cerulean", 0.94, 0.11, 0.0, 0.0),
    ("processblue", 0.96, 0.0, 0.0, 0.0),
    ("skyblue", 0.62, 0.0, 0.12, 0.0),
    ("turquoise", 0.85, 0.0, 0.20, 0.0),
    ("tealblue", 0.86, 0.0, 0.34, 0.02),
    ("aquamarine", 0.82, 0.0, 0.30, 0.0),
    ("bluegreen", 0.85, 0.0, 0.33, 0.0),
    ("emerald", 1.0, 0.0, 0.50, 0.0),
    ("junglegreen", 0.99, 0.0, 0.52, 0.0),
    ("seagreen", 0.69, 0.0, 0.50, 0.0),
    ("forestgreen", 0.91, 0.0, 0.88, 0.12),
    ("pinegreen", 0.92, 0.0, 0.59, 0.25),
    ("limegreen", 0.50, 0.0, 1.0, 0.0),
    ("yellowgreen", 0.44, 0.0, 0.74, 0.0),
    ("springgreen", 0.26, 0.0, 0.76, 0.0),
    ("olivegreen", 0.64, 0.0, 0.95, 0.40),
    ("rawsienna", 0.0, 0.72, 1.0, 0.45),
    ("sepia", 0.0, 0.83, 1.0, 0.70),
    ("brown", 0.0, 0.81, 1.0, 0.60),
    ("tan", 0.14, 0.42, 0.56, 0.0),
    ("gray", 0.0, 0.0, 0.0, 0.50),
];

const PREDEFINED_FORMULAS: &[(&str, &str)] = &[
    ("qquad", r"\quad\quad"),
    ("ne", r"\not\equals"),
    ("neq", r"\not\equals"),
    ("ldots", r"\mathinner{\ldotp\ldotp\ldotp}"),
    ("dotsc", r"\mathinner{\ldotp\ldotp\ldotp}"),
    ("dots", r"\mathinner{\ldotp\ldotp\ldotp}"),
    ("cdots", r"\mathinner{\cdotp\cdotp\cdotp}"),
    ("dotsb", r"\mathinner{\cdotp\cdotp\cdotp}"),
    ("dotso", r"\mathinner{\ldotp\ldotp\ldotp}"),
    ("dotsi", r"\!\mathinner{\cdotp\cdotp\cdotp}"),
    ("dotsm", r"\mathinner{\cdotp\cdotp\cdotp}"),
    ("hookrightarrow", r"\lhook\joinrel\joinrel\joinrel\rightarrow"),
    ("hookleftarrow", r"\leftarrow\joinrel\joinrel\joinrel\rhook"),
    ("Longrightarrow", r"\Relbar\joinrel\Rightarrow"),
    ("longrightarrow", r"\relbar\joinrel\rightarrow"),
    ("Longleftarrow", r"\Leftarrow\joinrel\Relbar"),
    ("longleftarrow", r"\leftarrow\joinrel\relbar"),
    ("Longleftrightarrow", r"\Leftarrow\joinrel\Rightarrow"),
    ("longleftrightarrow", r"\leftarrow\joinrel\rightarrow"),
    ("iff", r"\;\Longleftrightarrow\;"),
    ("implies", r"\;\Longrightarrow\;"),
    ("impliedby", r"\;\Longleftarrow\;"),
    ("mapsto", r"\mapstochar\rightarrow"),
    ("longmapsto", r"\mapstochar\longrightarrow"),
    ("log", r"\mathop{\mathrm{log}}\nolimits"),
    ("lg", r"\mathop{\mathrm{lg}}\nolimits"),
    ("ln", r"\mathop{\mathrm{ln}}\nolimits"),
    ("exp", r"\mathop{\mathrm{exp}}\nolimits"),
    ("sin", r"\mathop{\mathrm{sin}}\nolimits"),
    ("cos", r"\mathop{\mathrm{cos}}\nolimits"),
    ("tan", r"\mathop{\mathrm{tan}}\nolimits"),
    ("det", r"\mathop{\mathrm{det}}"),
    ("gcd", r"\mathop{\mathrm{gcd}}"),
    ("max", r"\mathop{\mathrm{max}}"),
    ("min", r"\mathop{\mathrm{min}}"),
    ("sup", r"\mathop{\mathrm{sup}}"),
    ("inf", r"\mathop{\mathrm{inf}}"),
    ("lim", r"\mathop{\mathrm{lim}}"),
    ("liminf", r"\mathop{\mathrm{lim\,inf}}"),
    ("limsup", r"\mathop{\mathrm{lim\,sup}}"),
    ("Pr", r"\mathop{\mathrm{Pr}}"),
];
