use std::cell::RefCell;
use std::rc::Rc;

use geocoin_game::{
    AUTO_MOVE_INTERVAL_MS, AutoMove, AutoMoveHandle, Direction, GameConfig, GameSession,
    GridCell, HashLuck, Outcome, StartKind,
};
use yew::prelude::*;

use crate::components::{CacheList, Controls};
use crate::dom::js_error_message;
use crate::storage::LocalStore;
use crate::timer::IntervalTask;
use crate::view_model::{auto_tick, cache_rows, outcome_message, status_line, trail_line};

type Session = GameSession<HashLuck, LocalStore>;
type SharedSession = Rc<RefCell<Session>>;

/// A running auto-move. Dropping it cancels the timer.
struct AutoRun {
    direction: Direction,
    handle: AutoMoveHandle,
    _timer: IntervalTask,
}

impl AutoRun {
    fn cancel(self) {
        self.handle.stop();
    }
}

fn boot() -> Result<SharedSession, String> {
    let store = LocalStore::open().map_err(|err| err.to_string())?;
    let mut session = GameSession::with_default_luck(GameConfig::load_from_static(), store);
    match session.start().map_err(|err| err.to_string())? {
        StartKind::Fresh => log::info!("starting a new game"),
        StartKind::Resumed { orphaned_mementos } => {
            log::info!("resumed saved game ({orphaned_mementos} stale caches)");
        }
    }
    Ok(Rc::new(RefCell::new(session)))
}

fn stop_auto(auto: &RefCell<Option<AutoRun>>) {
    if let Some(run) = auto.borrow_mut().take() {
        run.cancel();
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let booted = use_memo((), |_| boot());
    let message = use_state(String::new);
    let auto = use_mut_ref(|| None::<AutoRun>);
    let redraw = use_force_update();

    let session = match &*booted {
        Ok(session) => Rc::clone(session),
        Err(err) => {
            return html! {
                <main class="geocoin">
                    <p class="error">{ format!("Geocoin could not start: {err}") }</p>
                </main>
            };
        }
    };

    let on_step = {
        let session = Rc::clone(&session);
        let message = message.clone();
        Callback::from(move |direction: Direction| {
            let result = session.borrow_mut().step(direction);
            message.set(outcome_message(result, |cell| {
                format!("Moved {direction} into cell {cell}")
            }));
        })
    };

    let on_collect = {
        let session = Rc::clone(&session);
        let message = message.clone();
        Callback::from(move |cell: GridCell| {
            let result = session.borrow_mut().collect(&cell);
            message.set(outcome_message(result, |coin| format!("Collected coin {coin}")));
        })
    };

    let on_deposit = {
        let session = Rc::clone(&session);
        let message = message.clone();
        Callback::from(move |cell: GridCell| {
            let result = session.borrow_mut().deposit(&cell);
            message.set(outcome_message(result, |coin| format!("Deposited coin {coin}")));
        })
    };

    let on_auto = {
        let session = Rc::clone(&session);
        let auto = auto.clone();
        let redraw = redraw.clone();
        Callback::from(move |direction: Direction| {
            stop_auto(&auto);
            let (mut task, handle) = AutoMove::new(direction);
            let tick_session = Rc::clone(&session);
            let tick_redraw = redraw.clone();
            let tick = move || auto_tick(&mut task, &*tick_session, || tick_redraw.force_update());
            match IntervalTask::start(AUTO_MOVE_INTERVAL_MS, tick) {
                Ok(timer) => {
                    *auto.borrow_mut() = Some(AutoRun {
                        direction,
                        handle,
                        _timer: timer,
                    });
                }
                Err(err) => log::error!("could not schedule auto-move: {}", js_error_message(&err)),
            }
            redraw.force_update();
        })
    };

    let on_stop = {
        let auto = auto.clone();
        let redraw = redraw.clone();
        Callback::from(move |()| {
            stop_auto(&auto);
            redraw.force_update();
        })
    };

    let on_reset = {
        let session = Rc::clone(&session);
        let auto = auto.clone();
        let message = message.clone();
        Callback::from(move |()| {
            stop_auto(&auto);
            let result = session.borrow_mut().reset().map(Outcome::Done);
            message.set(outcome_message(result, |()| "Game reset".to_owned()));
        })
    };

    let (rows, status, trail) = {
        let session = session.borrow();
        (
            cache_rows(&session),
            status_line(session.player()),
            trail_line(session.history()),
        )
    };
    let auto_direction = auto.borrow().as_ref().map(|run| run.direction);

    html! {
        <main class="geocoin">
            <h1>{ "Geocoin" }</h1>
            <p class="status" aria-live="polite">{ status }</p>
            if let Some(trail) = trail {
                <p class="trail">{ trail }</p>
            }
            <p class="message">{ (*message).clone() }</p>
            <Controls {auto_direction} {on_step} {on_auto} {on_stop} {on_reset} />
            <CacheList {rows} {on_collect} {on_deposit} />
        </main>
    }
}
