//! Shared harness: a controller over an in-memory store that counts writes,
//! driven by key names the way the event loop drives it.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Local, TimeZone};

use stint::model::{
    ArchivedView, BoxTodoView, EntityRef, Id, IdeaView, InfoRow, ProjectView, SessionView,
    TakeawayView, TimerConfig, TodoView, TrackView,
};
use stint::ops::{ActionResult, Actions, Command, NewEntity, Store};
use stint::tui::keymap;
use stint::tui::state::NavigationController;
use stint::tui::state::now::ManualClock;

/// Store wrapper that counts every `execute` call
pub struct CountingStore {
    inner: Store,
    writes: Rc<Cell<usize>>,
}

impl Actions for CountingStore {
    fn execute(&mut self, command: Command) -> ActionResult {
        self.writes.set(self.writes.get() + 1);
        self.inner.execute(command)
    }
    fn tracks(&self) -> Vec<TrackView> {
        self.inner.tracks()
    }
    fn projects(&self, track_id: Id) -> Vec<ProjectView> {
        self.inner.projects(track_id)
    }
    fn todos(&self, project_id: Id) -> Vec<TodoView> {
        self.inner.todos(project_id)
    }
    fn box_todos(&self) -> Vec<BoxTodoView> {
        self.inner.box_todos()
    }
    fn ideas(&self) -> Vec<IdeaView> {
        self.inner.ideas()
    }
    fn sessions(&self) -> Vec<SessionView> {
        self.inner.sessions()
    }
    fn takeaways(&self, session_id: Id) -> Vec<TakeawayView> {
        self.inner.takeaways(session_id)
    }
    fn archived(&self) -> Vec<ArchivedView> {
        self.inner.archived()
    }
    fn todo(&self, id: Id) -> Option<TodoView> {
        self.inner.todo(id)
    }
    fn project(&self, id: Id) -> Option<ProjectView> {
        self.inner.project(id)
    }
    fn info(&self, target: EntityRef) -> Option<Vec<InfoRow>> {
        self.inner.info(target)
    }
}

pub struct Ids {
    pub work: Id,
    pub home: Id,
    pub site: Id,
    pub docs: Id,
    pub garden: Id,
    pub header: Id,
    pub footer: Id,
    pub call_bank: Id,
    pub buy_stamps: Id,
    pub podcast: Id,
}

pub struct Harness {
    pub nav: NavigationController,
    pub clock: ManualClock,
    pub ids: Ids,
    writes: Rc<Cell<usize>>,
}

fn create(store: &mut Store, new: NewEntity) -> Id {
    store.execute(Command::Create(new)).data.unwrap()
}

fn track(store: &mut Store, name: &str) -> Id {
    create(
        store,
        NewEntity::Track {
            name: name.into(),
            description: String::new(),
        },
    )
}

fn project(store: &mut Store, track_id: Id, name: &str) -> Id {
    create(
        store,
        NewEntity::Project {
            track_id,
            name: name.into(),
            description: String::new(),
            deadline: None,
            importance: 0,
            urgency: 0,
        },
    )
}

fn todo(store: &mut Store, project_id: Id, name: &str, total_stages: u32) -> Id {
    create(
        store,
        NewEntity::Todo {
            project_id,
            name: name.into(),
            description: String::new(),
            deadline: None,
            importance: 0,
            urgency: 0,
            current_stage: 0,
            total_stages,
        },
    )
}

/// Work{Site{Header(3 stages), Footer}, Docs}, Home{Garden}, two box todos,
/// one idea. Starts in Structure at the track list.
pub fn harness() -> Harness {
    let mut store = Store::in_memory();
    let work = track(&mut store, "Work");
    let home = track(&mut store, "Home");
    let site = project(&mut store, work, "Site");
    let docs = project(&mut store, work, "Docs");
    let garden = project(&mut store, home, "Garden");
    let header = todo(&mut store, site, "Header", 3);
    let footer = todo(&mut store, site, "Footer", 1);
    let call_bank = create(
        &mut store,
        NewEntity::BoxTodo {
            name: "Call bank".into(),
            description: String::new(),
            deadline: None,
            importance: 0,
            urgency: 0,
        },
    );
    let buy_stamps = create(
        &mut store,
        NewEntity::BoxTodo {
            name: "Buy stamps".into(),
            description: String::new(),
            deadline: None,
            importance: 0,
            urgency: 0,
        },
    );
    let podcast = create(
        &mut store,
        NewEntity::Idea {
            name: "Podcast".into(),
            description: String::new(),
            importance: 0,
        },
    );

    let writes = Rc::new(Cell::new(0));
    let clock = ManualClock::new(Local.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
    let nav = NavigationController::new(
        Box::new(CountingStore {
            inner: store,
            writes: writes.clone(),
        }),
        Box::new(clock.clone()),
        &TimerConfig::default(),
    );
    Harness {
        nav,
        clock,
        ids: Ids {
            work,
            home,
            site,
            docs,
            garden,
            header,
            footer,
            call_bank,
            buy_stamps,
            podcast,
        },
        writes,
    }
}

impl Harness {
    pub fn press(&mut self, keys: &[&str]) {
        for key in keys {
            keymap::dispatch(&mut self.nav, key);
        }
    }

    /// Type text one key at a time
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            let name = if c == ' ' { "space".to_string() } else { c.to_string() };
            keymap::dispatch(&mut self.nav, &name);
        }
    }

    /// Advance the clock and run one tick
    pub fn wait(&mut self, seconds: i64) {
        self.clock.advance(seconds);
        self.nav.tick();
    }

    pub fn message(&self) -> Option<&str> {
        self.nav.messages().text()
    }

    /// Store writes issued since the harness was built
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn todo(&self, id: Id) -> TodoView {
        self.nav.actions().todo(id).unwrap()
    }
}
