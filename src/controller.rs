//! Card controller
//!
//! `CardController` owns the [`CardState`] and the [`Surface`] it renders to.
//! Every operation mutates state first and then reflects it onto the surface;
//! re-applying the same state is always safe.
//!
//! Uploads are split in two halves so the asynchronous step stays outside:
//! `begin_*` runs synchronously when the file is picked (and clears the file
//! input), `finish_*` runs when the loader resolves. Each upload carries a
//! token; completions for superseded image uploads are dropped.

use log::{debug, error, info, warn};

use crate::config::CardConfig;
use crate::error::{CardError, CardResult, FONT_LOAD_NOTICE, FONT_UNSUPPORTED_NOTICE, IMAGE_LOAD_NOTICE};
use crate::models::card_state::CardState;
use crate::models::fonts::PendingFont;
use crate::models::image::{recompute, Placement, PointerPos};
use crate::models::style::LayoutVariant;
use crate::models::typography::{self, FontScaleStyle, FontSize, SpacingStyle, FONT_SCALE_VAR};
use crate::print::live_clone::{HAS_VALUE_CLASS, SELECTED_CLASS};
use crate::print::{compose_filler, compose_live_clone, FillerStyle, PrintMode, PrintSheet, WordBanks};
use crate::surface::{CardEvent, Node, Surface};

const ACTIVE_CLASS: &str = "active";
const HAS_IMAGE_CLASS: &str = "has-image";
const DRAGGING_CLASS: &str = "dragging";

pub struct CardController<S: Surface> {
    config: CardConfig,
    state: CardState,
    surface: S,
    banks: WordBanks,
    print_mode: PrintMode,
    /// Token of the newest image upload
    image_token: u64,
    /// Token of the newest font upload that became the body font
    activated_font_token: u64,
    last_sheet: Option<PrintSheet>,
}

impl<S: Surface> CardController<S> {
    /// Create a controller; the surface is not touched until [`init`](Self::init)
    pub fn new(config: CardConfig, surface: S) -> CardResult<Self> {
        config.validate()?;
        Ok(Self {
            state: CardState::new(&config),
            print_mode: config.print_mode,
            config,
            surface,
            banks: WordBanks::default(),
            image_token: 0,
            activated_font_token: 0,
            last_sheet: None,
        })
    }

    /// Apply the initial state to the surface
    pub fn init(&mut self) {
        let body_font = self.state.style.body_font.clone();
        let hand_font = self.state.style.hand_font.clone();
        let ink = self.state.style.ink.clone();

        self.surface.set_value(&Node::BodyFontSelect, &body_font);
        self.surface.set_value(&Node::HandFontSelect, &hand_font);
        self.set_body_font(&body_font);
        self.set_hand_font(&hand_font);
        self.set_ink(&ink);
        self.set_variant(self.state.style.variant);
        self.update_image_size_label();
        self.set_spacing_scale(self.state.scale.spacing);
        self.set_font_scale(self.state.scale.font_scale);

        info!("Card designer initialized ({:?} print mode)", self.print_mode);
    }

    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The sheet built by the most recent composition
    pub fn last_sheet(&self) -> Option<&PrintSheet> {
        self.last_sheet.as_ref()
    }

    pub fn print_mode(&self) -> PrintMode {
        self.print_mode
    }

    pub fn set_print_mode(&mut self, mode: PrintMode) {
        self.print_mode = mode;
    }

    /// Replace the word banks used by filler cards
    pub fn set_word_banks(&mut self, banks: WordBanks) {
        self.banks = banks;
    }

    // ------------------------------------------------------------------
    // Event dispatch
    // ------------------------------------------------------------------

    /// Route one input event to its operation
    pub fn dispatch(&mut self, event: CardEvent) -> CardResult<()> {
        debug!("dispatch {}", event.kind());

        match event {
            CardEvent::BubbleClick { group, value } => {
                self.select_bubble(&group, &value);
            }
            CardEvent::BubbleInput { group, text } => self.set_custom_text(&group, &text),
            CardEvent::FieldInput { name, text } => self.set_field(&name, &text),
            CardEvent::StyleClick { variant } => self.set_variant(variant),
            CardEvent::SwatchClick { color } => self.pick_swatch(&color),
            CardEvent::CustomInk { color } => self.set_ink(&color),
            CardEvent::SpacingInput { value } => {
                self.set_spacing_scale(value);
            }
            CardEvent::FontScaleInput { value } => {
                self.set_font_scale(value);
            }
            CardEvent::BodyFontChange { value } => self.set_body_font(&value),
            CardEvent::HandFontChange { value } => self.set_hand_font(&value),
            CardEvent::ImageSizeInput { value } => self.set_image_size(value),
            CardEvent::ImageLoaded { natural_width, natural_height } => {
                self.image_loaded(natural_width, natural_height);
            }
            CardEvent::PointerDown { pointer_id, client_x, client_y } => {
                self.pointer_down(pointer_id, PointerPos::new(client_x, client_y));
            }
            CardEvent::PointerMove { client_x, client_y, .. } => {
                self.pointer_move(PointerPos::new(client_x, client_y));
            }
            CardEvent::PointerUp { pointer_id }
            | CardEvent::PointerCancel { pointer_id }
            | CardEvent::LostPointerCapture { pointer_id } => self.stop_drag(pointer_id),
            CardEvent::Resize => {
                self.render_image();
            }
            CardEvent::ClearImage => self.clear_image(),
            CardEvent::Reset => self.reset(),
            CardEvent::Print => self.print()?,
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Toggle a bubble; returns whether it is active afterwards
    pub fn select_bubble(&mut self, group: &str, value: &str) -> bool {
        let active = self.state.selection.select_bubble(group, value);

        self.surface.set_class(&Node::group_bubbles(group), SELECTED_CLASS, false);
        if active {
            self.surface.set_class(&Node::bubble(group, value), SELECTED_CLASS, true);
        }

        let input = Node::bubble_input(group);
        self.surface.set_value(&input, "");
        self.surface.set_class(&input, HAS_VALUE_CLASS, false);

        active
    }

    pub fn set_custom_text(&mut self, group: &str, text: &str) {
        self.state.selection.set_custom_text(group, text);

        let custom_active = self.state.selection.group(group).map_or(false, |g| g.custom_active);
        self.surface.set_class(&Node::bubble_input(group), HAS_VALUE_CLASS, custom_active);
        if custom_active {
            self.surface.set_class(&Node::group_bubbles(group), SELECTED_CLASS, false);
        }
    }

    /// Plain text field outside any bubble group
    pub fn set_field(&mut self, name: &str, text: &str) {
        let has_value = self.state.set_field(name, text);
        self.surface.set_class(&Node::text_field(name), HAS_VALUE_CLASS, has_value);
    }

    // ------------------------------------------------------------------
    // Style
    // ------------------------------------------------------------------

    pub fn set_variant(&mut self, variant: LayoutVariant) {
        let previous = self.state.style.set_variant(variant);
        if previous != variant {
            info!("Layout variant: {} -> {}", previous, variant);
        }

        self.surface.set_class(&Node::StyleButtons, ACTIVE_CLASS, false);
        self.surface.set_class(&Node::StyleButton { variant }, ACTIVE_CLASS, true);

        for other in LayoutVariant::ALL {
            if let Some(class) = other.body_class() {
                self.surface.set_class(&Node::Body, class, false);
            }
        }
        if let Some(class) = variant.body_class() {
            self.surface.set_class(&Node::Body, class, true);
        }
    }

    /// Apply an ink color verbatim and mark the matching swatch, if any
    pub fn set_ink(&mut self, color: &str) {
        let swatch = self.state.style.set_ink(color, &self.config.ink_presets);

        self.surface.set_style(&Node::Root, "--ink-color", Some(color));
        self.surface.set_class(&Node::InkSwatches, ACTIVE_CLASS, false);
        if swatch.is_some() {
            self.surface.set_class(&Node::swatch(color), ACTIVE_CLASS, true);
        }
    }

    /// Swatch click: apply the color and mirror it into the custom color input
    pub fn pick_swatch(&mut self, color: &str) {
        self.set_ink(color);
        self.surface.set_value(&Node::InkCustom, color);
    }

    pub fn set_body_font(&mut self, family: &str) {
        self.state.style.body_font = family.to_string();
        self.surface.set_style(&Node::Card, "font-family", Some(family));
        self.surface.set_style(&Node::FontTargets, "font-family", Some(family));
    }

    pub fn set_hand_font(&mut self, family: &str) {
        self.state.style.hand_font = family.to_string();
        self.surface.set_style(&Node::Card, "--hand-font", Some(family));
    }

    // ------------------------------------------------------------------
    // Typography
    // ------------------------------------------------------------------

    pub fn set_spacing_scale(&mut self, raw: f64) -> SpacingStyle {
        let style = typography::spacing_style(&self.config.spacing, self.config.label_mode, raw);
        self.state.scale.spacing = style.scale;

        self.surface.set_style(&Node::Card, "gap", Some(&style.gap));
        self.surface.set_style(&Node::Card, "padding", Some(&style.padding));
        self.surface.set_text(&Node::SpacingLabel, &style.label);
        style
    }

    pub fn set_font_scale(&mut self, raw: f64) -> FontScaleStyle {
        let style = typography::font_scale_style(&self.config.font_scale, self.config.label_mode, raw);
        self.state.scale.font_scale = style.scale;

        match &style.size {
            FontSize::Multiplier(value) => {
                self.surface.set_style(&Node::Card, "font-size", None);
                self.surface.set_style(&Node::Card, FONT_SCALE_VAR, Some(value));
            }
            FontSize::Absolute(value) => {
                self.surface.set_style(&Node::Card, FONT_SCALE_VAR, None);
                self.surface.set_style(&Node::Card, "font-size", Some(value));
            }
        }
        self.surface.set_text(&Node::FontSizeLabel, &style.label);
        style
    }

    // ------------------------------------------------------------------
    // Image placement
    // ------------------------------------------------------------------

    fn update_image_size_label(&mut self) {
        let label = format!("{}%", self.state.image.size.round() as i64);
        self.surface.set_text(&Node::ImageSizeLabel, &label);
    }

    /// Reconcile the image with the card and apply the result
    pub fn render_image(&mut self) -> Placement {
        let card = self.surface.measure(&Node::Card).unwrap_or_default();
        let (next, placement) = recompute(&self.state.image, card, &self.state.image_limits);
        self.state.image = next;

        match placement {
            Placement::Hidden => {
                self.surface.set_class(&Node::ImageLayer, HAS_IMAGE_CLASS, false);
                self.surface.set_attribute(&Node::CardImage, "src", None);
            }
            Placement::Deferred => {
                debug!("Card has no size yet; image render deferred");
            }
            Placement::Placed { size, x, y, .. } => {
                self.surface.set_class(&Node::ImageLayer, HAS_IMAGE_CLASS, true);
                self.surface.set_style(&Node::CardImage, "width", Some(&format!("{}%", size)));
                self.surface.set_style(&Node::CardImage, "left", Some(&format!("{}%", x)));
                self.surface.set_style(&Node::CardImage, "top", Some(&format!("{}%", y)));
                self.update_image_size_label();
            }
        }
        placement
    }

    /// Size slider input, as a fraction of the card width
    pub fn set_image_size(&mut self, fraction: f64) {
        self.state.image.size = self.state.image_limits.size_from_slider(fraction);
        self.update_image_size_label();
        self.render_image();
    }

    /// The image element reported its natural dimensions
    pub fn image_loaded(&mut self, natural_width: f64, natural_height: f64) {
        if !self.state.image.set_natural_size(natural_width, natural_height) {
            debug!("Ignoring image load with empty natural size");
            return;
        }
        self.render_image();
    }

    /// Idle -> Dragging; returns whether a drag started
    pub fn pointer_down(&mut self, pointer_id: i32, pointer: PointerPos) -> bool {
        let Some(card) = self.surface.measure(&Node::Card) else {
            return false;
        };
        if !self.state.drag.start(pointer_id, pointer, card, &self.state.image) {
            return false;
        }

        self.surface.set_class(&Node::CardImage, DRAGGING_CLASS, true);
        self.surface.set_pointer_capture(&Node::CardImage, pointer_id, true);
        true
    }

    pub fn pointer_move(&mut self, pointer: PointerPos) {
        let Some(card) = self.surface.measure(&Node::Card) else {
            return;
        };
        if let Some((x, y)) = self.state.drag.center_for(pointer, card) {
            self.state.image.x = x;
            self.state.image.y = y;
            self.render_image();
        }
    }

    /// Dragging -> Idle on pointer up, cancel or capture loss
    pub fn stop_drag(&mut self, pointer_id: i32) {
        if !self.state.drag.stop() {
            return;
        }

        self.surface.set_class(&Node::CardImage, DRAGGING_CLASS, false);
        if self.surface.has_pointer_capture(&Node::CardImage, pointer_id) {
            self.surface.set_pointer_capture(&Node::CardImage, pointer_id, false);
        }
    }

    /// Remove the image. Any upload still in flight is superseded.
    pub fn clear_image(&mut self) {
        self.image_token += 1;
        self.state.image.clear();
        self.state.drag.stop();

        self.surface.set_class(&Node::ImageLayer, HAS_IMAGE_CLASS, false);
        self.surface.set_class(&Node::CardImage, DRAGGING_CLASS, false);
        self.surface.set_attribute(&Node::CardImage, "src", None);
        self.surface.set_value(&Node::ImageUpload, "");
    }

    /// Start an image upload; returns its token
    pub fn begin_image_upload(&mut self) -> u64 {
        self.image_token += 1;
        self.surface.set_value(&Node::ImageUpload, "");
        debug!("Image upload {} started", self.image_token);
        self.image_token
    }

    /// Apply the outcome of an image upload
    ///
    /// Success installs the source, recentred; the aspect ratio follows once
    /// the image element reports its natural size. Failure shows a notice and
    /// leaves the previous image in place.
    pub fn finish_image_upload(&mut self, token: u64, result: CardResult<String>) -> CardResult<()> {
        if token != self.image_token {
            debug!("Dropping image upload {} (latest is {})", token, self.image_token);
            return Err(CardError::StaleUpload { token });
        }

        match result {
            Ok(src) => {
                self.surface.set_attribute(&Node::CardImage, "src", Some(&src));
                self.state.image.load_source(src);
                info!("Image upload {} loaded", token);
                Ok(())
            }
            Err(err) => {
                error!("Image upload {} failed: {}", token, err);
                self.surface.notify(err.user_notice().unwrap_or(IMAGE_LOAD_NOTICE));
                Err(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Fonts
    // ------------------------------------------------------------------

    /// Start a body font upload
    ///
    /// Fails with `UnsupportedCapability` (after notifying) when the
    /// environment cannot load fonts; nothing else changes in that case.
    pub fn begin_font_upload(&mut self, filename: &str, supported: bool) -> CardResult<PendingFont> {
        self.surface.set_value(&Node::FontUpload, "");

        if !supported {
            warn!("Font upload rejected: FontFace is unavailable");
            self.surface.notify(FONT_UNSUPPORTED_NOTICE);
            return Err(CardError::UnsupportedCapability("FontFace".to_string()));
        }

        let pending = self.state.fonts.reserve(filename);
        debug!("Font upload {} started as '{}'", pending.token, pending.option.family);
        Ok(pending)
    }

    /// Apply the outcome of a font registration
    ///
    /// A loaded font always becomes a selectable option. It becomes the body
    /// font unless a newer upload has already been activated.
    pub fn finish_font_upload(&mut self, pending: PendingFont, result: CardResult<()>) -> CardResult<()> {
        if let Err(err) = result {
            error!("Font '{}' failed to load: {}", pending.option.family, err);
            self.surface.notify(err.user_notice().unwrap_or(FONT_LOAD_NOTICE));
            return Err(err);
        }

        let option = pending.option;
        if self.state.fonts.register(option.clone()) {
            self.surface.add_option(&Node::BodyFontSelect, &option.value, &option.label);
        }

        if pending.token > self.activated_font_token {
            self.activated_font_token = pending.token;
            self.surface.set_value(&Node::BodyFontSelect, &option.value);
            self.set_body_font(&option.value);
            info!("Font '{}' loaded and selected", option.family);
        } else {
            info!("Font '{}' loaded; a newer upload keeps the selection", option.family);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reset and print
    // ------------------------------------------------------------------

    /// Clear selections, text, image, and restore the sliders to their defaults
    pub fn reset(&mut self) {
        self.state.selection.clear();
        self.state.fields.clear();
        self.surface.set_class(&Node::Bubbles, SELECTED_CLASS, false);
        self.surface.set_value(&Node::TextInputs, "");
        self.surface.set_class(&Node::TextInputs, HAS_VALUE_CLASS, false);

        self.clear_image();

        let image_default = self.config.image_size.default;
        self.surface.set_value(&Node::ImageSizeSlider, &image_default.to_string());
        self.state.image.size = self.state.image_limits.size_from_slider(image_default);
        self.update_image_size_label();

        let spacing = self.config.spacing.default;
        let font_scale = self.config.font_scale.default;
        self.surface.set_value(&Node::SpacingSlider, &spacing.to_string());
        self.surface.set_value(&Node::FontSizeSlider, &font_scale.to_string());
        self.set_spacing_scale(spacing);
        self.set_font_scale(font_scale);

        info!("Card reset");
    }

    /// Build the print sheet for the current mode and mount it, replacing
    /// whatever the print container held
    pub fn compose_print_sheet(&mut self) -> CardResult<&PrintSheet> {
        let copies = self.config.copies_for(self.print_mode);
        let sheet = match self.print_mode {
            PrintMode::LiveClone => {
                let card = self
                    .surface
                    .capture(&Node::Card)
                    .ok_or_else(|| CardError::MissingNode("card".to_string()))?;
                compose_live_clone(&card, copies)
            }
            PrintMode::ProceduralFiller => {
                let style = FillerStyle::from(&self.state.style);
                compose_filler(&style, &self.banks, copies)
            }
        };

        self.surface.mount(&Node::PrintSheet, &sheet.slots);
        debug!("Print sheet composed: {} {:?} cards", sheet.len(), sheet.mode);

        let sheet = self.last_sheet.insert(sheet);
        Ok(&*sheet)
    }

    /// Compose the sheet, then open the print dialog
    pub fn print(&mut self) -> CardResult<()> {
        self.compose_print_sheet()?;
        self.surface.print();
        Ok(())
    }
}
