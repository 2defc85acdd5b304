#![windows_subsystem = "windows"]

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use arboard::{Clipboard, ImageData};
use druid::kurbo::Line;
use druid::menu::MenuEventCtx;
use druid::piet::{
    ImageFormat, InterpolationMode, PietImage, StrokeStyle, Text, TextLayoutBuilder,
};
use druid::widget::{
    Button, Controller, CrossAxisAlignment, Flex, Label, LineBreaking, Scroll, TextBox,
};
use druid::{
    Affine, AppLauncher, BoxConstraints, Color, Data, Env, Event, EventCtx, FontFamily, KbKey,
    LayoutCtx, Lens, LifeCycle, LifeCycleCtx, Menu, MenuItem, MouseButton, PaintCtx, Point, Rect,
    RenderContext, Size, UpdateCtx, Widget, WidgetExt, WindowDesc, WindowId,
};
//  image v0.24.9
use image::{ImageBuffer, Rgba};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use sprite_checker::crop;
use sprite_checker::geometry;
use sprite_checker::grid::GridSettings;
use sprite_checker::selection::SelectionField;
use sprite_checker::{
    Change, EditorConfig, EditorError, ExportFormat, Input, Key, PointerButton, Session,
};

const IMAGE_FILTER: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff"];
// Right presses that move less than this open a context menu instead of panning.
const CLICK_SLOP: f64 = 3.0;

const BACKGROUND: Color = Color::grey8(48);
const SPRITE_STROKE: Color = Color::rgb8(0, 200, 255);
const GHOST_STROKE: Color = Color::rgb8(255, 210, 0);
const SELECTION_STROKE: Color = Color::WHITE;
const SELECTION_FILL: Color = Color::rgba8(0, 120, 215, 60);
const LABEL_COLOR: Color = Color::WHITE;

#[derive(Clone, Data, Lens)]
struct AppState {
    #[data(ignore)]
    session: Rc<RefCell<Session>>,
    #[data(ignore)]
    changes: Rc<RefCell<Vec<Change>>>,
    revision: u64,
    image_revision: u64,
    draft_name: String,
    draft_tag: String,
    field_x: String,
    field_y: String,
    field_width: String,
    field_height: String,
    pointer: String,
    status: String,
}

impl AppState {
    fn new(mut session: Session) -> Self {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        session.subscribe(move |change| sink.borrow_mut().push(change));
        let mut state = AppState {
            session: Rc::new(RefCell::new(session)),
            changes,
            revision: 0,
            image_revision: 0,
            draft_name: String::new(),
            draft_tag: String::new(),
            field_x: String::new(),
            field_y: String::new(),
            field_width: String::new(),
            field_height: String::new(),
            pointer: String::new(),
            status: String::new(),
        };
        state.status = state.describe_status();
        state
    }

    /// Runs one session operation, reports a failure once, then picks up
    /// whatever it changed.
    fn with_session<R>(
        &mut self,
        op: impl FnOnce(&mut Session) -> Result<R, EditorError>,
    ) -> Option<R> {
        let result = op(&mut self.session.borrow_mut());
        let value = match result {
            Ok(value) => Some(value),
            Err(e) => {
                show_error(&e);
                None
            }
        };
        self.absorb_changes();
        value
    }

    /// Pushes text typed into the side panel into the session.
    fn push_inputs(&mut self, before: &AppState) {
        {
            let mut session = self.session.borrow_mut();
            if before.draft_name != self.draft_name {
                session.set_draft_name(self.draft_name.clone());
            }
            if before.draft_tag != self.draft_tag {
                session.set_draft_tag(self.draft_tag.clone());
            }
            let fields = [
                (SelectionField::X, &before.field_x, &self.field_x),
                (SelectionField::Y, &before.field_y, &self.field_y),
                (SelectionField::Width, &before.field_width, &self.field_width),
                (SelectionField::Height, &before.field_height, &self.field_height),
            ];
            for (field, old, new) in fields {
                if old != new {
                    session.set_selection_field(field, new);
                }
            }
        }
        self.absorb_changes();
    }

    fn absorb_changes(&mut self) {
        let changes: Vec<Change> = self.changes.borrow_mut().drain(..).collect();
        if changes.is_empty() {
            return;
        }
        if changes.contains(&Change::Image) {
            self.image_revision += 1;
        }
        if changes.contains(&Change::Selection) {
            self.refresh_fields();
        }
        self.revision += 1;
        self.status = self.describe_status();
    }

    fn refresh_fields(&mut self) {
        let session = self.session.borrow();
        let selection = session.selection();
        let text = |field| selection.field(field).map(|v| v.to_string()).unwrap_or_default();
        self.field_x = text(SelectionField::X);
        self.field_y = text(SelectionField::Y);
        self.field_width = text(SelectionField::Width);
        self.field_height = text(SelectionField::Height);
        self.draft_name = selection.draft().name.clone();
        self.draft_tag = selection.draft().tag.clone();
    }

    fn describe_status(&self) -> String {
        let session = self.session.borrow();
        format!(
            "Zoom {}  |  {} sprites  |  {}",
            session.view().zoom_label(),
            session.atlas().len(),
            self.pointer
        )
    }

    fn image_summary(&self) -> String {
        let session = self.session.borrow();
        match (session.image(), session.metadata()) {
            (Some(image), Some(meta)) => format!(
                "{}\nSize: {}\nDPI: {}\nColor: {} ({})\nFile size: {}\nTransparency: {}",
                image.file_name(),
                meta.dimensions_label(),
                meta.dpi_label(),
                meta.format,
                meta.bit_depth_label(),
                meta.file_size_label(),
                meta.transparency_label()
            ),
            _ => "No image loaded".to_string(),
        }
    }

    fn sprite_list(&self) -> String {
        let session = self.session.borrow();
        session
            .atlas()
            .sprites()
            .iter()
            .map(|s| match &s.tag {
                Some(tag) => {
                    format!("{} [{}]  {},{} {}x{}", s.name, tag, s.x, s.y, s.width, s.height)
                }
                None => format!("{}  {},{} {}x{}", s.name, s.x, s.y, s.width, s.height),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn commit_draft(&mut self) {
        let added = self.with_session(|s| s.commit_draft());
        if added == Some(false) {
            self.status = "Select a region and give it a name first".to_string();
        }
    }
}

fn dashes() -> StrokeStyle {
    StrokeStyle::new().dash_pattern(&[4.0, 3.0])
}

fn show_error(err: &dyn std::fmt::Display) {
    log::error!("{err}");
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Error")
        .set_description(err.to_string())
        .show();
}

// Clipboard helpers
fn copy_image_to_clipboard(image: &ImageBuffer<Rgba<u8>, Vec<u8>>) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    let image_data = ImageData {
        width: image.width() as usize,
        height: image.height() as usize,
        bytes: image.as_raw().into(),
    };
    clipboard.set_image(image_data)?;
    Ok(())
}

fn to_core(p: Point) -> geometry::Point {
    geometry::Point::new(p.x, p.y)
}

fn to_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Right => PointerButton::Right,
        _ => PointerButton::Other,
    }
}

// Dialog actions

fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open image")
        .add_filter("Images", IMAGE_FILTER)
        .pick_file()
}

fn open_image(data: &mut AppState) {
    let Some(path) = pick_image() else {
        return;
    };
    if data.with_session(|s| s.load_image(&path)).is_some() {
        data.with_session(|s| Ok(s.zoom_to_fit()));
    }
}

fn open_atlas(data: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Open atlas")
        .add_filter("Atlas JSON", &["json"])
        .pick_file()
    else {
        return;
    };
    let Some(warning) = data.with_session(|s| s.load_atlas(&path)).flatten() else {
        return;
    };
    if !warning.needs_image() {
        MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Image size changed")
            .set_description(warning.to_string())
            .show();
        return;
    }
    let locate = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Image not loaded")
        .set_description(format!("{warning}\n\nLocate the image now?"))
        .set_buttons(MessageButtons::YesNo)
        .show();
    if matches!(locate, MessageDialogResult::Yes) {
        if let Some(image) = pick_image() {
            data.with_session(|s| s.attach_image(&image));
        }
    }
}

fn save_atlas(data: &mut AppState) {
    if data.session.borrow().atlas().is_empty() {
        show_error(&EditorError::EmptyAtlas);
        return;
    }
    let mut dialog = rfd::FileDialog::new()
        .set_title("Save atlas")
        .set_file_name("atlas.json");
    for format in ExportFormat::ALL {
        dialog = dialog.add_filter(format.label(), &[format.extension()]);
    }
    let Some(path) = dialog.save_file() else {
        return;
    };
    if let Some(format) = data.with_session(|s| s.save_atlas(&path)) {
        data.status = format!("Saved {} as {}", path.display(), format.label());
    }
}

fn save_settings(data: &mut AppState) {
    let Some(path) = EditorConfig::default_path() else {
        return;
    };
    let config = data.session.borrow().config().clone();
    match config.save(&path) {
        Ok(()) => data.status = format!("Settings saved to {}", path.display()),
        Err(e) => show_error(&e),
    }
}

fn export_sprite(data: &mut AppState, index: usize) {
    let Some(sprite) = data.session.borrow().atlas().sprite(index).cloned() else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export sprite")
        .set_file_name(crop::default_file_name(&sprite))
        .add_filter("PNG", &["png"])
        .add_filter("JPEG", &["jpg", "jpeg"])
        .add_filter("BMP", &["bmp"])
        .save_file()
    else {
        return;
    };
    if data.with_session(|s| s.export_sprite(index, &path)).is_some() {
        data.status = format!("Exported '{}'", sprite.name);
    }
}

fn copy_sprite(data: &mut AppState, index: usize) {
    let Some(image) = data.with_session(|s| s.crop_sprite(index)) else {
        return;
    };
    if let Err(e) = copy_image_to_clipboard(&image.to_rgba8()) {
        show_error(&e);
    }
}

// Menus

fn app_menu(_window: Option<WindowId>, _data: &AppState, _env: &Env) -> Menu<AppState> {
    let file = Menu::new("File")
        .entry(MenuItem::new("Open Image...").on_activate(|_ctx, data: &mut AppState, _| {
            open_image(data)
        }))
        .entry(MenuItem::new("Open Atlas...").on_activate(|_ctx, data: &mut AppState, _| {
            open_atlas(data)
        }))
        .entry(MenuItem::new("Save Atlas As...").on_activate(|_ctx, data: &mut AppState, _| {
            save_atlas(data)
        }))
        .separator()
        .entry(MenuItem::new("Save Settings").on_activate(|_ctx, data: &mut AppState, _| {
            save_settings(data)
        }))
        .separator()
        .entry(MenuItem::new("Exit").on_activate(|ctx: &mut MenuEventCtx, _, _| {
            ctx.submit_command(druid::commands::QUIT_APP)
        }));

    let view = Menu::new("View")
        .entry(MenuItem::new("Zoom In").on_activate(|_ctx, data: &mut AppState, _| {
            data.with_session(|s| Ok(s.zoom_in()));
        }))
        .entry(MenuItem::new("Zoom Out").on_activate(|_ctx, data: &mut AppState, _| {
            data.with_session(|s| Ok(s.zoom_out()));
        }))
        .entry(MenuItem::new("Zoom to Fit").on_activate(|_ctx, data: &mut AppState, _| {
            data.with_session(|s| Ok(s.zoom_to_fit()));
        }))
        .entry(MenuItem::new("Actual Size").on_activate(|_ctx, data: &mut AppState, _| {
            data.with_session(|s| Ok(s.actual_size()));
        }))
        .separator()
        .entry(MenuItem::new("Toggle Grid").on_activate(|_ctx, data: &mut AppState, _| {
            data.with_session(|s| Ok(s.toggle_grid()));
        }));

    let sprites = Menu::new("Sprites")
        .entry(MenuItem::new("Add Selection").on_activate(|_ctx, data: &mut AppState, _| {
            data.commit_draft()
        }))
        .entry(MenuItem::new("Cancel Selection").on_activate(|_ctx, data: &mut AppState, _| {
            data.with_session(|s| Ok(s.cancel_selection()));
        }))
        .separator()
        .entry(MenuItem::new("Clear All").on_activate(|_ctx, data: &mut AppState, _| {
            data.with_session(|s| Ok(s.clear_sprites()));
        }));

    Menu::empty().entry(file).entry(view).entry(sprites)
}

fn sprite_menu(index: usize) -> Menu<AppState> {
    Menu::empty()
        .entry(MenuItem::new("Edit").on_activate(move |_ctx, data: &mut AppState, _| {
            data.with_session(|s| Ok(s.edit_sprite(index)));
        }))
        .entry(MenuItem::new("Remove").on_activate(move |_ctx, data: &mut AppState, _| {
            data.with_session(|s| Ok(s.remove_sprite(index)));
        }))
        .separator()
        .entry(MenuItem::new("Export...").on_activate(move |_ctx, data: &mut AppState, _| {
            export_sprite(data, index)
        }))
        .entry(MenuItem::new("Copy").on_activate(move |_ctx, data: &mut AppState, _| {
            copy_sprite(data, index)
        }))
}

fn selection_menu() -> Menu<AppState> {
    Menu::empty()
        .entry(MenuItem::new("Add Sprite").on_activate(|_ctx, data: &mut AppState, _| {
            data.commit_draft()
        }))
        .entry(MenuItem::new("Cancel").on_activate(|_ctx, data: &mut AppState, _| {
            data.with_session(|s| Ok(s.cancel_selection()));
        }))
}

// Widget implementation
struct AtlasCanvas {
    cached_image: Option<PietImage>,
    image_revision: u64,
    right_press: Option<Point>,
}

impl AtlasCanvas {
    fn new() -> Self {
        AtlasCanvas { cached_image: None, image_revision: 0, right_press: None }
    }

    fn dispatch(&self, ctx: &mut EventCtx, data: &mut AppState, input: Input) -> bool {
        let result = data.session.borrow_mut().handle(input);
        match result {
            Ok(handled) => {
                if handled {
                    ctx.request_paint();
                }
                handled
            }
            Err(e) => {
                show_error(&e);
                false
            }
        }
    }

    fn context_menu(&self, ctx: &mut EventCtx, data: &AppState, pos: Point) {
        let session = data.session.borrow();
        if let Some(index) = session.sprite_at(to_core(pos)) {
            ctx.show_context_menu(sprite_menu(index), pos);
        } else if session.selection().is_visible() {
            ctx.show_context_menu(selection_menu(), pos);
        }
    }
}

impl Widget<AppState> for AtlasCanvas {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState, _env: &Env) {
        match event {
            Event::MouseDown(e) => {
                ctx.request_focus();
                ctx.set_active(true);
                if e.button.is_right() {
                    self.right_press = Some(e.pos);
                }
                let button = to_button(e.button);
                self.dispatch(ctx, data, Input::PointerDown { button, position: to_core(e.pos) });
            }

            Event::MouseMove(e) => {
                data.pointer = match data.session.borrow().pointer_position(to_core(e.pos)) {
                    Some(p) => format!("X: {:.0}, Y: {:.0}", p.x, p.y),
                    None => String::new(),
                };
                self.dispatch(ctx, data, Input::PointerMove { position: to_core(e.pos) });
                data.status = data.describe_status();
            }

            Event::MouseUp(e) => {
                ctx.set_active(false);
                let button = to_button(e.button);
                self.dispatch(ctx, data, Input::PointerUp { button, position: to_core(e.pos) });
                if e.button.is_right() {
                    let pressed = self.right_press.take();
                    if pressed.is_some_and(|p| p.distance(e.pos) < CLICK_SLOP) {
                        self.context_menu(ctx, data, e.pos);
                    }
                }
            }

            Event::Wheel(e) => {
                let input = Input::Wheel {
                    delta_y: e.wheel_delta.y,
                    ctrl: e.mods.ctrl(),
                    position: to_core(e.pos),
                };
                if self.dispatch(ctx, data, input) {
                    ctx.set_handled();
                }
            }

            Event::KeyDown(k) => {
                let key = match k.key {
                    KbKey::Escape => Some(Key::Escape),
                    KbKey::Enter => Some(Key::Enter),
                    _ => None,
                };
                if let Some(key) = key {
                    if self.dispatch(ctx, data, Input::Key(key)) {
                        ctx.set_handled();
                    }
                }
            }
            _ => {}
        }
    }

    fn lifecycle(
        &mut self,
        ctx: &mut LifeCycleCtx,
        event: &LifeCycle,
        data: &AppState,
        _env: &Env,
    ) {
        match event {
            LifeCycle::BuildFocusChain => ctx.register_for_focus(),
            LifeCycle::Size(size) => {
                let viewport =
                    (!size.is_empty()).then(|| geometry::Size::new(size.width, size.height));
                data.session.borrow_mut().set_viewport(viewport);
                ctx.request_paint();
            }
            _ => {}
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx, old: &AppState, data: &AppState, _env: &Env) {
        if self.image_revision != data.image_revision {
            self.image_revision = data.image_revision;
            self.cached_image = None;
        }
        if old.revision != data.revision {
            ctx.request_paint();
        }
    }

    fn layout(
        &mut self,
        _ctx: &mut LayoutCtx,
        bc: &BoxConstraints,
        _data: &AppState,
        _env: &Env,
    ) -> Size {
        let max = bc.max();
        if max.is_finite() { max } else { bc.constrain((800.0, 600.0)) }
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState, _env: &Env) {
        let size = ctx.size();
        ctx.clip(size.to_rect());
        ctx.fill(size.to_rect(), &BACKGROUND);

        let session = data.session.borrow();
        let Some(loaded) = session.image() else {
            return;
        };

        if self.cached_image.is_none() {
            let buf = loaded.bitmap().to_rgba8();
            self.cached_image = ctx
                .make_image(
                    buf.width() as usize,
                    buf.height() as usize,
                    buf.as_raw(),
                    ImageFormat::RgbaSeparate,
                )
                .ok();
        }

        let view = *session.view();
        let meta = loaded.metadata();
        let image_rect = Rect::new(0.0, 0.0, f64::from(meta.width), f64::from(meta.height));
        let image_to_view =
            Affine::new([view.zoom(), 0.0, 0.0, view.zoom(), -view.pan_x(), -view.pan_y()]);

        let cached = &self.cached_image;
        ctx.with_save(|ctx| {
            ctx.transform(image_to_view);
            if let Some(img) = cached {
                ctx.draw_image(img, image_rect, InterpolationMode::NearestNeighbor);
            }
            paint_grid(ctx, session.grid(), meta.size(), view.zoom());
        });

        let mapper = session.mapper();
        let to_view = |x: f64, y: f64, w: f64, h: f64| {
            let a = mapper.to_view_space(geometry::Point::new(x, y));
            let b = mapper.to_view_space(geometry::Point::new(x + w, y + h));
            Rect::new(a.x, a.y, b.x, b.y)
        };

        for sprite in session.atlas().sprites() {
            let r = to_view(
                f64::from(sprite.x),
                f64::from(sprite.y),
                f64::from(sprite.width),
                f64::from(sprite.height),
            );
            ctx.stroke(r, &SPRITE_STROKE, 1.5);
            let layout = ctx
                .text()
                .new_text_layout(sprite.name.clone())
                .font(FontFamily::SYSTEM_UI, 11.0)
                .text_color(LABEL_COLOR)
                .build();
            if let Ok(layout) = layout {
                ctx.draw_text(&layout, (r.x0 + 2.0, r.y0 + 1.0));
            }
        }

        if let Some(ghost) = session.last_added() {
            let r = to_view(
                f64::from(ghost.x),
                f64::from(ghost.y),
                f64::from(ghost.width),
                f64::from(ghost.height),
            );
            ctx.stroke_styled(r, &GHOST_STROKE, 1.5, &dashes());
        }

        let pending = session.selection().pending();
        if pending.visible {
            let r = to_view(pending.x, pending.y, pending.width, pending.height);
            ctx.fill(r, &SELECTION_FILL);
            ctx.stroke_styled(r, &SELECTION_STROKE, 1.0, &dashes());
        }
    }
}

fn paint_grid(ctx: &mut PaintCtx, grid: &GridSettings, image: geometry::Size, zoom: f64) {
    let lines = grid.lines(image);
    if lines.vertical.is_empty() && lines.horizontal.is_empty() {
        return;
    }
    let alpha = (grid.clamped_opacity() * 255.0).round() as u8;
    let color = Color::rgba8(grid.color.r, grid.color.g, grid.color.b, alpha);
    let width = GridSettings::line_thickness(zoom);
    for &x in &lines.vertical {
        ctx.stroke(Line::new((x, 0.0), (x, image.height)), &color, width);
    }
    for &y in &lines.horizontal {
        ctx.stroke(Line::new((0.0, y), (image.width, y)), &color, width);
    }
}

/// Feeds side panel edits into the session after each event.
struct SyncInputs;

impl<W: Widget<AppState>> Controller<AppState, W> for SyncInputs {
    fn event(
        &mut self,
        child: &mut W,
        ctx: &mut EventCtx,
        event: &Event,
        data: &mut AppState,
        env: &Env,
    ) {
        let before = data.clone();
        child.event(ctx, event, data, env);
        data.push_inputs(&before);
    }
}

fn numeric_field(
    label: &str,
    lens: impl Lens<AppState, String> + 'static,
) -> impl Widget<AppState> {
    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(Label::new(label))
        .with_child(TextBox::new().lens(lens).fix_width(56.0))
}

fn side_panel() -> impl Widget<AppState> {
    let info = Label::dynamic(|data: &AppState, _| data.image_summary())
        .with_line_break_mode(LineBreaking::WordWrap);
    let fields = Flex::row()
        .with_child(numeric_field("X", AppState::field_x))
        .with_spacer(4.0)
        .with_child(numeric_field("Y", AppState::field_y))
        .with_spacer(4.0)
        .with_child(numeric_field("W", AppState::field_width))
        .with_spacer(4.0)
        .with_child(numeric_field("H", AppState::field_height));
    let buttons = Flex::row()
        .with_child(Button::new("Add Sprite").on_click(|_ctx, data: &mut AppState, _| {
            data.commit_draft()
        }))
        .with_spacer(4.0)
        .with_child(Button::new("Cancel").on_click(|_ctx, data: &mut AppState, _| {
            data.with_session(|s| Ok(s.cancel_selection()));
        }));
    let sprites = Scroll::new(Label::dynamic(|data: &AppState, _| data.sprite_list())).vertical();

    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(info)
        .with_spacer(12.0)
        .with_child(Label::new("Name"))
        .with_child(TextBox::new().lens(AppState::draft_name).expand_width())
        .with_spacer(4.0)
        .with_child(Label::new("Tag"))
        .with_child(TextBox::new().lens(AppState::draft_tag).expand_width())
        .with_spacer(4.0)
        .with_child(fields)
        .with_spacer(8.0)
        .with_child(buttons)
        .with_spacer(12.0)
        .with_child(Label::new("Sprites"))
        .with_flex_child(sprites, 1.0)
        .padding(8.0)
        .fix_width(280.0)
}

fn build_root() -> impl Widget<AppState> {
    let body = Flex::row()
        .cross_axis_alignment(CrossAxisAlignment::Fill)
        .with_flex_child(AtlasCanvas::new(), 1.0)
        .with_child(side_panel());
    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Fill)
        .with_flex_child(body, 1.0)
        .with_child(Label::dynamic(|data: &AppState, _| data.status.clone()).padding(4.0))
        .controller(SyncInputs)
}

fn main() -> Result<()> {
    let config = EditorConfig::load_default().unwrap_or_else(|e| {
        show_error(&e);
        EditorConfig::default()
    });
    let init = AppState::new(Session::new(config));
    let window = WindowDesc::new(build_root())
        .title("Sprite Checker")
        .window_size((1280.0, 800.0))
        .menu(app_menu);
    AppLauncher::with_window(window)
        .log_to_console()
        .launch(init)?;
    Ok(())
}
