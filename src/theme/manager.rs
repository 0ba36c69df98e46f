//! ThemeTokenManager: per-theme token loading
//!
//! Owns the nine category stores of one theme and runs every raw config
//! value through the same pipeline: reference resolution across all
//! categories, then the expression calculator where the category allows
//! arithmetic. Stores are mutated only here; projections afterwards only
//! read.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::color::{
    generate_scale, ColorSeed, ModifierRange, Rgb, ScaleMode, TonalPaletteProvider,
};
use crate::emit;
use crate::error::{EngineError, TokenError};
use crate::expr::calculate;
use crate::theme::config::{ColorEntry, LiteralEntry, RangeEntry, ScaleEntry, ThemeConfig};
use crate::token::store::{SharedStore, TokenStore};
use crate::token::{Category, Token};

/// Shared per-category stores of one dependency subtree
pub(crate) type Scope = HashMap<Category, SharedStore>;

/// Name and step suffixes of one generated color scale, kept for nested
/// projection output
#[derive(Clone, Debug)]
pub(crate) struct ScaleOutline {
    pub name: String,
    pub steps: Vec<String>,
}

/// One composite typography style: (css property, token name) per field
#[derive(Clone, Debug)]
pub(crate) struct TypographyOutline {
    pub name: String,
    pub fields: Vec<(&'static str, String)>,
}

#[derive(Debug)]
pub struct ThemeTokenManager {
    name: String,
    selectors: Vec<String>,
    stores: HashMap<Category, SharedStore>,
    scales: Vec<ScaleOutline>,
    typography: Vec<TypographyOutline>,
}

impl ThemeTokenManager {
    /// Fresh shared stores for a dependency subtree
    pub(crate) fn new_scope(prefix: &str) -> Scope {
        Category::ALL
            .into_iter()
            .map(|category| {
                (
                    category,
                    Rc::new(RefCell::new(TokenStore::new(category, prefix))),
                )
            })
            .collect()
    }

    /// Load a dependency theme directly into the shared scope stores. Its
    /// tokens become visible to every theme above it in the subtree.
    pub(crate) fn load_into_scope(
        config: &ThemeConfig,
        scope: &Scope,
        tonal: Option<&dyn TonalPaletteProvider>,
    ) -> Result<(), EngineError> {
        let stores: HashMap<Category, SharedStore> = scope
            .iter()
            .map(|(category, store)| (*category, Rc::clone(store)))
            .collect();
        Self::build(config, stores, tonal).map(drop)
    }

    /// Load a theme into private stores. With a scope, each store delegates
    /// lookups to the shared store of its category; the theme's own tokens
    /// are never written back into the scope.
    pub(crate) fn load(
        config: &ThemeConfig,
        scope: Option<&Scope>,
        tonal: Option<&dyn TonalPaletteProvider>,
    ) -> Result<Self, EngineError> {
        let stores: HashMap<Category, SharedStore> = Category::ALL
            .into_iter()
            .map(|category| {
                let store = match scope {
                    Some(scope) => TokenStore::with_delegate(
                        category,
                        &config.prefix,
                        Rc::clone(&scope[&category]),
                    ),
                    None => TokenStore::new(category, &config.prefix),
                };
                (category, Rc::new(RefCell::new(store)))
            })
            .collect();
        Self::build(config, stores, tonal)
    }

    fn build(
        config: &ThemeConfig,
        stores: HashMap<Category, SharedStore>,
        tonal: Option<&dyn TonalPaletteProvider>,
    ) -> Result<Self, EngineError> {
        debug!("loading theme `{}`", config.name);

        let mut manager = Self {
            name: config.name.clone(),
            selectors: config.selectors.clone(),
            stores,
            scales: Vec::new(),
            typography: Vec::new(),
        };

        // Shared scope stores serve several themes in turn; variable names
        // must carry the prefix of the theme that declares the token.
        for store in manager.stores.values() {
            store.borrow_mut().set_prefix(&config.prefix);
        }

        manager.load_colors(config, tonal)?;
        manager.load_scale_entries(Category::Spacing, &config.spacing)?;
        manager.load_scale_entries(Category::Radius, &config.radius)?;
        manager.load_literals(Category::FontFamily, &config.font_family)?;
        manager.load_literals(Category::FontWeight, &config.font_weight)?;
        manager.load_literals(Category::LineHeight, &config.line_height)?;
        manager.load_scale_entries(Category::FontSize, &config.font_size)?;
        manager.load_literals(Category::LetterSpacing, &config.letter_spacing)?;
        manager.load_typography(config)?;

        Ok(manager)
    }

    // ========================================================================
    // Loading
    // ========================================================================

    fn load_colors(
        &mut self,
        config: &ThemeConfig,
        tonal: Option<&dyn TonalPaletteProvider>,
    ) -> Result<(), EngineError> {
        for entry in &config.colors {
            match entry {
                ColorEntry::Literal(literal) => {
                    self.add_literal(Category::Color, literal)?;
                }
                ColorEntry::Seed(entry) => {
                    let seed = ColorSeed {
                        name: entry.name.clone(),
                        rgb: self.parse_hex(&entry.name, &entry.value)?,
                        mode: entry.mode,
                        solid_light: self.parse_hex_opt(&entry.name, &entry.solid_light)?,
                        solid_dark: self.parse_hex_opt(&entry.name, &entry.solid_dark)?,
                        range: entry.range,
                    };
                    self.add_seed(&seed);
                }
                ColorEntry::Brand(brand) => {
                    let provider = tonal.ok_or_else(|| {
                        self.token_error(Category::Color, &brand.source, TokenError::MissingTonalProvider)
                    })?;
                    let source = self.parse_hex("brand", &brand.source)?;
                    let roles = provider.generate(source, brand).map_err(|e| {
                        self.token_error(
                            Category::Color,
                            &brand.source,
                            TokenError::TonalProvider(e.to_string()),
                        )
                    })?;
                    for (role, rgb) in roles {
                        self.add_seed(&ColorSeed {
                            name: role,
                            rgb,
                            mode: ScaleMode::Hsb,
                            solid_light: None,
                            solid_dark: None,
                            range: ModifierRange::default(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn add_seed(&mut self, seed: &ColorSeed) {
        let steps = generate_scale(seed);
        let mut outline = ScaleOutline {
            name: seed.name.clone(),
            steps: Vec::with_capacity(steps.len()),
        };
        let store = &self.stores[&Category::Color];
        for step in steps {
            let token_name = if step.suffix == "DEFAULT" {
                seed.name.clone()
            } else {
                format!("{}-{}", seed.name, step.suffix)
            };
            store.borrow_mut().insert(&token_name, step.value);
            outline.steps.push(step.suffix);
        }
        self.scales.push(outline);
    }

    fn load_scale_entries(
        &mut self,
        category: Category,
        entries: &[ScaleEntry],
    ) -> Result<(), EngineError> {
        for entry in entries {
            match entry {
                ScaleEntry::Literal(literal) => self.add_literal(category, literal)?,
                ScaleEntry::Range(range) => self.add_range(category, range)?,
            }
        }
        Ok(())
    }

    fn add_range(&mut self, category: Category, range: &RangeEntry) -> Result<(), EngineError> {
        if range.step <= 0.0 {
            return Ok(());
        }
        // Step by index rather than accumulating: repeated `+= step` drifts
        // for non-representable steps and loses the final token.
        let mut i = 0u32;
        loop {
            let value = round_step(range.min + f64::from(i) * range.step);
            if value > range.max + 1e-9 {
                break;
            }
            let name = format!("{value}");
            let raw = format!("{}{}", round_step(value * range.factor), range.unit);
            self.add_literal(category, &LiteralEntry::new(name, raw))?;
            i += 1;
        }
        Ok(())
    }

    fn load_literals(
        &mut self,
        category: Category,
        entries: &[LiteralEntry],
    ) -> Result<(), EngineError> {
        for entry in entries {
            self.add_literal(category, entry)?;
        }
        Ok(())
    }

    fn add_literal(&mut self, category: Category, entry: &LiteralEntry) -> Result<(), EngineError> {
        let resolved = self.resolve_references(&entry.value);
        let value = if category.behavior().calculate {
            calculate(&resolved)
                .map_err(|e| self.token_error(category, &entry.name, e.into()))?
        } else {
            resolved
        };

        let mut store = self.stores[&category].borrow_mut();
        if entry.var {
            store.insert(&entry.name, value);
        } else {
            store.insert_plain(&entry.name, value);
        }
        Ok(())
    }

    fn load_typography(&mut self, config: &ThemeConfig) -> Result<(), EngineError> {
        for style in &config.typography {
            let fields: [(&'static str, &'static str, &Option<String>); 5] = [
                ("fontFamily", "font-family", &style.font_family),
                ("fontSize", "font-size", &style.font_size),
                ("fontWeight", "font-weight", &style.font_weight),
                ("lineHeight", "line-height", &style.line_height),
                ("letterSpacing", "letter-spacing", &style.letter_spacing),
            ];

            let mut outline = TypographyOutline {
                name: style.name.clone(),
                fields: Vec::new(),
            };

            for (property, suffix, raw) in fields {
                let Some(raw) = raw else { continue };
                let token_name = format!("{}-{}", style.name, suffix);
                let resolved = self.resolve_references(raw);
                let value = calculate(&resolved)
                    .map_err(|e| self.token_error(Category::Typography, &token_name, e.into()))?;
                self.stores[&Category::Typography]
                    .borrow_mut()
                    .insert(&token_name, value);
                outline.fields.push((property, token_name));
            }

            self.typography.push(outline);
        }
        Ok(())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn parse_hex(&self, token: &str, hex: &str) -> Result<Rgb, EngineError> {
        Rgb::from_hex(hex).map_err(|e| self.token_error(Category::Color, token, e.into()))
    }

    fn parse_hex_opt(
        &self,
        token: &str,
        hex: &Option<String>,
    ) -> Result<Option<Rgb>, EngineError> {
        hex.as_ref().map(|h| self.parse_hex(token, h)).transpose()
    }

    fn token_error(&self, category: Category, token: &str, source: TokenError) -> EngineError {
        EngineError::TokenLoad {
            theme: self.name.clone(),
            category: category.tag(),
            token: token.to_string(),
            source,
        }
    }

    // ========================================================================
    // Read-only surface
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Selectors for the emitted CSS block; `:root` when none configured
    pub fn selectors(&self) -> Vec<String> {
        if self.selectors.is_empty() {
            vec![":root".to_string()]
        } else {
            self.selectors.clone()
        }
    }

    /// Snapshot of a category's tokens in emission order
    pub fn tokens(&self, category: Category) -> Vec<Token> {
        self.stores[&category].borrow().tokens().to_vec()
    }

    /// Resolve `{category.path}` references against every category store
    /// (each store substitutes its own category and chains to its
    /// delegate). Unresolvable references stay verbatim.
    pub fn resolve_references(&self, text: &str) -> String {
        let mut text = text.to_string();
        for category in Category::ALL {
            text = self.stores[&category].borrow().resolve_references(&text);
        }
        text
    }

    /// Resolve a `var(--x)` expression back to the bound token's value,
    /// searching every category and delegate chain; unchanged when nothing
    /// matches
    pub fn resolve_absolute_value(&self, expr: &str) -> String {
        for category in Category::ALL {
            let resolved = self.stores[&category].borrow().resolve_absolute(expr);
            if resolved != expr {
                return resolved;
            }
        }
        expr.to_string()
    }

    pub(crate) fn scales(&self) -> &[ScaleOutline] {
        &self.scales
    }

    pub(crate) fn typography(&self) -> &[TypographyOutline] {
        &self.typography
    }

    /// Complete CSS rule: variable declarations under the theme's selectors
    pub fn css(&self) -> String {
        emit::css::rule(self)
    }

    /// Ordered `--name: value;` declaration lines
    pub fn css_lines(&self) -> Vec<String> {
        emit::css::lines(self)
    }

    /// Nested Tailwind theme configuration. With `absolute`, values are the
    /// resolved literals instead of `var(...)` expressions.
    pub fn tailwind_config(&self, absolute: bool) -> serde_json::Value {
        emit::tailwind::config(self, absolute)
    }

    /// Register typography utility classes through the injected plugin API
    pub fn apply(&self, api: &mut dyn emit::tailwind::PluginApi) {
        emit::tailwind::apply(self, api);
    }
}

/// Snap a computed range value to 9 decimals so binary drift never leaks
/// into token names or emitted quantities
fn round_step(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}
