//! Superstars entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, Window};

    use superstars::Settings;
    use superstars::consts::{SHOP_ITEM_HEIGHT, SHOP_ITEM_WIDTH};
    use superstars::platform::{Driver, FrameScheduler};
    use superstars::sim::{Area, Page, RelayoutTicket, Section};

    /// Measurable area element for each section
    fn area_id(section: Section) -> &'static str {
        match section {
            Section::Shop => "shopArea",
            Section::About => "aboutText",
            Section::Stockists => "stockistsArea",
            Section::Interviews => "interviewsArea",
        }
    }

    fn missing(what: &str) -> JsValue {
        JsValue::from_str(&format!("missing {what}"))
    }

    fn measure(document: &Document, section: Section) -> Area {
        document
            .get_element_by_id(area_id(section))
            .map(|el| Area::new(el.client_width() as f32, el.client_height() as f32))
            .unwrap_or_default()
    }

    /// requestAnimationFrame-backed scheduler
    struct RafScheduler {
        window: Window,
        callback: Closure<dyn FnMut(f64)>,
    }

    impl FrameScheduler for RafScheduler {
        type Handle = i32;

        fn request(&mut self) -> Option<i32> {
            self.window
                .request_animation_frame(self.callback.as_ref().unchecked_ref())
                .ok()
        }

        fn cancel(&mut self, handle: i32) {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }

    /// DOM nodes the effects render into
    struct PageView {
        document: Document,
        sections: Vec<(Section, Element)>,
        shop_items: Vec<HtmlElement>,
        about_text: Option<HtmlElement>,
        about_words: Vec<HtmlElement>,
        stockist_boxes: Vec<HtmlElement>,
        interview_labels: Vec<HtmlElement>,
        speed_display: Option<Element>,
        play_button: Option<Element>,
    }

    fn set_style(el: &HtmlElement, prop: &str, value: &str) {
        let _ = el.style().set_property(prop, value);
    }

    impl PageView {
        /// Write every effect's current state to its elements
        fn render(&self, page: &Page) {
            for (el, item) in self.shop_items.iter().zip(&page.bouncer.items) {
                set_style(
                    el,
                    "transform",
                    &format!("translate({}px, {}px)", item.pos.x, item.pos.y),
                );
            }

            if let Some(text) = &self.about_text {
                set_style(text, "filter", &format!("hue-rotate({}deg)", page.hue.hue));
            }
            for (el, word) in self.about_words.iter().zip(&page.hue.words) {
                set_style(el, "transform", &format!("rotate({}deg)", word.rotation));
            }

            for (el, gb) in self.stockist_boxes.iter().zip(&page.shuffler.boxes) {
                set_style(
                    el,
                    "transform",
                    &format!("translate({}px, {}px)", gb.offset.x, gb.offset.y),
                );
            }

            for (el, label) in self.interview_labels.iter().zip(&page.faller.labels) {
                set_style(el, "left", &format!("{}px", label.pos.x));
                set_style(el, "top", &format!("{}px", label.pos.y));
            }
        }

        fn render_controls(&self, page: &Page) {
            if let Some(el) = &self.speed_display {
                el.set_text_content(Some(&page.clock.speed_label()));
            }
            // Show the action the button will perform next
            if let Some(el) = &self.play_button {
                el.set_text_content(Some(if page.clock.is_playing() { "⏸" } else { "▶" }));
            }
        }

        fn render_section(&self, section: Section, visible: bool) {
            if let Some((_, el)) = self.sections.iter().find(|(s, _)| *s == section) {
                let classes = el.class_list();
                let _ = if visible {
                    classes.remove_1("hidden")
                } else {
                    classes.add_1("hidden")
                };
                let _ = el.set_attribute("aria-hidden", if visible { "false" } else { "true" });
            }
        }
    }

    /// Page instance holding the driver and its view
    struct App {
        driver: Driver<RafScheduler>,
        view: PageView,
        relayout_delay_ms: i32,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            if self.driver.run_frame(time) {
                self.view.render(&self.driver.page);
            }
        }

        fn measure(&self, section: Section) -> Area {
            measure(&self.view.document, section)
        }

        fn redeem(&mut self, ticket: RelayoutTicket) {
            let area = self.measure(ticket.section);
            if self.driver.page.redeem_relayout(ticket, area) {
                self.view.render(&self.driver.page);
            }
        }

        fn resize(&mut self) {
            let document = self.view.document.clone();
            self.driver.page.resize(|s| measure(&document, s));
            self.view.render(&self.driver.page);
        }
    }

    fn build_shop(document: &Document, settings: &Settings) -> Result<Vec<HtmlElement>, JsValue> {
        let area = document
            .get_element_by_id(area_id(Section::Shop))
            .ok_or_else(|| missing("#shopArea"))?;
        let mut items = Vec::with_capacity(settings.shop_image_urls.len());
        for url in &settings.shop_image_urls {
            let link: HtmlElement = document.create_element("a")?.dyn_into()?;
            link.set_attribute("href", &settings.shop_link)?;
            link.set_attribute("target", "_blank")?;
            let img = document.create_element("img")?;
            img.set_attribute("src", url)?;
            img.set_attribute("class", "shop-item")?;
            link.append_child(&img)?;
            area.append_child(&link)?;
            // transform is the sole position source
            set_style(&link, "left", "0px");
            set_style(&link, "top", "0px");
            set_style(&link, "width", &format!("{SHOP_ITEM_WIDTH}px"));
            set_style(&link, "height", &format!("{SHOP_ITEM_HEIGHT}px"));
            items.push(link);
        }
        Ok(items)
    }

    fn build_about(document: &Document, page: &Page) -> Result<Vec<HtmlElement>, JsValue> {
        let Some(text) = document.get_element_by_id(area_id(Section::About)) else {
            log::warn!("No #aboutText; word spin disabled");
            return Ok(Vec::new());
        };
        text.set_inner_html("");
        let mut spans = Vec::with_capacity(page.hue.words.len());
        for (i, word) in page.hue.words.iter().enumerate() {
            if i > 0 {
                text.insert_adjacent_text("beforeend", " ")?;
            }
            let span: HtmlElement = document.create_element("span")?.dyn_into()?;
            span.set_attribute("class", "spin-word")?;
            span.set_text_content(Some(&word.text));
            set_style(&span, "display", "inline-block");
            text.append_child(&span)?;
            spans.push(span);
        }
        Ok(spans)
    }

    fn build_stockists(document: &Document, page: &Page) -> Result<Vec<HtmlElement>, JsValue> {
        let area = document
            .get_element_by_id(area_id(Section::Stockists))
            .ok_or_else(|| missing("#stockistsArea"))?;
        let mut boxes = Vec::with_capacity(page.shuffler.boxes.len());
        for i in 0..page.shuffler.boxes.len() {
            let el: HtmlElement = document.create_element("div")?.dyn_into()?;
            el.set_attribute("class", "stockist-box")?;
            el.set_inner_html(&format!(
                "<strong>Shop {}</strong><br><small>123{} Star Ave, Suite {}</small>",
                i + 1,
                i,
                10 + i
            ));
            area.append_child(&el)?;
            boxes.push(el);
        }
        Ok(boxes)
    }

    fn build_interviews(document: &Document, page: &Page) -> Result<Vec<HtmlElement>, JsValue> {
        let area = document
            .get_element_by_id(area_id(Section::Interviews))
            .ok_or_else(|| missing("#interviewsArea"))?;
        let mut labels = Vec::with_capacity(page.faller.labels.len());
        for (i, label) in page.faller.labels.iter().enumerate() {
            let el: HtmlElement = document.create_element("a")?.dyn_into()?;
            el.set_attribute("href", &format!("#interview-{}", i + 1))?;
            el.set_attribute("class", "interview-name")?;
            el.set_text_content(Some(&label.text));
            area.append_child(&el)?;
            labels.push(el);
        }
        Ok(labels)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Superstars starting...");

        let window = web_sys::window().ok_or_else(|| missing("window"))?;
        let document = window.document().ok_or_else(|| missing("document"))?;
        let settings = Settings::load();

        // All sections start hidden, no category active
        let mut sections = Vec::with_capacity(Section::ALL.len());
        for section in Section::ALL {
            match document.get_element_by_id(section.as_str()) {
                Some(el) => {
                    el.class_list().add_1("hidden")?;
                    el.set_attribute("aria-hidden", "true")?;
                    sections.push((section, el));
                }
                None => log::warn!("No #{} section", section.as_str()),
            }
        }
        let buttons = document.query_selector_all(".cat-btn")?;
        for i in 0..buttons.length() {
            if let Some(btn) = buttons.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                btn.class_list().remove_1("active")?;
            }
        }

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let mut page = Page::new(&settings, seed, |s| measure(&document, s));
        if let Some(text) = document
            .get_element_by_id(area_id(Section::About))
            .and_then(|el| el.text_content())
            .filter(|t| !t.trim().is_empty())
        {
            page.set_about_text(&text);
        }

        let about_text = document
            .get_element_by_id(area_id(Section::About))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let view = PageView {
            shop_items: build_shop(&document, &settings)?,
            about_words: build_about(&document, &page)?,
            stockist_boxes: build_stockists(&document, &page)?,
            interview_labels: build_interviews(&document, &page)?,
            about_text,
            speed_display: document.get_element_by_id("speedDisplay"),
            play_button: document.get_element_by_id("playPauseBtn"),
            sections,
            document: document.clone(),
        };
        view.render(&page);
        view.render_controls(&page);

        let relayout_delay_ms = settings.relayout_delay_ms;
        let app = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            let weak = weak.clone();
            let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                if let Some(app) = weak.upgrade() {
                    app.borrow_mut().frame(time);
                }
            });
            let scheduler = RafScheduler {
                window: window.clone(),
                callback,
            };
            RefCell::new(App {
                driver: Driver::new(page, scheduler),
                view,
                relayout_delay_ms,
            })
        });

        setup_controls(&document, app.clone())?;
        setup_categories(&document, app.clone())?;
        setup_resize(&window, app.clone())?;
        expose_api(&window, app)?;

        log::info!("Superstars running!");
        Ok(())
    }

    fn on_click(
        el: &Element,
        handler: impl FnMut(web_sys::MouseEvent) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(handler);
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_controls(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("playPauseBtn") {
            let app = app.clone();
            on_click(&btn, move |_| {
                let mut a = app.borrow_mut();
                a.driver.toggle_play();
                a.view.render_controls(&a.driver.page);
            })?;
        }
        if let Some(btn) = document.get_element_by_id("slowBtn") {
            let app = app.clone();
            on_click(&btn, move |_| {
                let mut a = app.borrow_mut();
                a.driver.slow_down();
                a.view.render_controls(&a.driver.page);
            })?;
        }
        if let Some(btn) = document.get_element_by_id("fastBtn") {
            on_click(&btn, move |_| {
                let mut a = app.borrow_mut();
                a.driver.speed_up();
                a.view.render_controls(&a.driver.page);
            })?;
        }
        Ok(())
    }

    fn setup_categories(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let buttons = document.query_selector_all(".cat-btn")?;
        for i in 0..buttons.length() {
            let Some(btn) = buttons.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(section) = btn
                .get_attribute("data-target")
                .and_then(|t| Section::from_str(&t))
            else {
                log::warn!("Category button without a known data-target");
                continue;
            };
            let app = app.clone();
            let btn_clone = btn.clone();
            on_click(&btn, move |_| {
                let _ = btn_clone.class_list().toggle("active");
                let (visible, ticket) = {
                    let mut a = app.borrow_mut();
                    let (visible, ticket) = a.driver.page.toggle_section(section);
                    a.view.render_section(section, visible);
                    (visible, ticket)
                };
                if let (true, Some(ticket)) = (visible, ticket) {
                    schedule_relayout(app.clone(), ticket);
                }
            })?;
        }
        Ok(())
    }

    /// Re-measure a freshly shown container once the browser has laid it out
    fn schedule_relayout(app: Rc<RefCell<App>>, ticket: RelayoutTicket) {
        let delay = app.borrow().relayout_delay_ms;
        let Some(window) = web_sys::window() else {
            return;
        };
        let weak = Rc::downgrade(&app);
        let callback = Closure::once_into_js(move || {
            if let Some(app) = weak.upgrade() {
                app.borrow_mut().redeem(ticket);
            }
        });
        if let Err(e) = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            log::warn!("Relayout timer failed: {:?}", e);
        }
    }

    fn setup_resize(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// `window._superstars = { setSpeed, play, pause }`
    fn expose_api(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let api = js_sys::Object::new();

        let a = app.clone();
        let set_speed = Closure::<dyn FnMut(f64)>::new(move |v: f64| {
            let mut a = a.borrow_mut();
            a.driver.set_speed(v as f32);
            a.view.render_controls(&a.driver.page);
        });
        js_sys::Reflect::set(&api, &"setSpeed".into(), &set_speed.into_js_value())?;

        let a = app.clone();
        let play = Closure::<dyn FnMut()>::new(move || {
            let mut a = a.borrow_mut();
            a.driver.play();
            a.view.render_controls(&a.driver.page);
        });
        js_sys::Reflect::set(&api, &"play".into(), &play.into_js_value())?;

        let pause = Closure::<dyn FnMut()>::new(move || {
            let mut a = app.borrow_mut();
            a.driver.pause();
            a.view.render_controls(&a.driver.page);
        });
        js_sys::Reflect::set(&api, &"pause".into(), &pause.into_js_value())?;

        js_sys::Reflect::set(window, &"_superstars".into(), &api)?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_page::run() {
        log::error!("Superstars failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    log::info!("Superstars (native) starting...");
    log::info!("Native mode runs a headless simulation - serve the wasm build for the page");

    run_headless();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Ten seconds at 60 fps, with a pause and a speed change along the way
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() {
    use superstars::Settings;
    use superstars::platform::{Driver, ManualScheduler};
    use superstars::sim::{Area, Page, Section};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or(12345);
    let page = Page::new(&settings, seed, |section| match section {
        Section::Shop => Area::new(960.0, 540.0),
        Section::About => Area::new(960.0, 200.0),
        Section::Stockists => Area::new(1024.0, 320.0),
        Section::Interviews => Area::new(640.0, 480.0),
    });
    let mut driver = Driver::new(page, ManualScheduler::new());
    for section in Section::ALL {
        driver.page.toggle_section(section);
    }

    let mut time = 0.0;
    for i in 0..600 {
        match i {
            120 => driver.pause(),
            180 => driver.play(),
            300 => driver.speed_up(),
            _ => {}
        }
        driver.pump(time);
        time += FRAME_MS;
    }

    let page = &driver.page;
    log::info!(
        "After {:.1}s: speed {}, hue {:.1}°, spinning word {:?}",
        time / 1000.0,
        page.clock.speed_label(),
        page.hue.hue,
        page.hue.active_word().map(|i| page.hue.words[i].text.as_str())
    );
    for (i, item) in page.bouncer.items.iter().enumerate() {
        log::info!("Shop item {}: ({:.1}, {:.1})", i, item.pos.x, item.pos.y);
    }
    log::info!(
        "Frames requested {}, cancelled {}",
        driver.scheduler().requests,
        driver.scheduler().cancels
    );
    println!("✓ Headless run complete");
}
