use crate::scores::LocalBestScores;
use crate::timers::WebScheduler;
use crate::utils::*;
use pexeso_core::{self as game, CardView, Controls, Difficulty, GameController, Pos, Task};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

impl StorageKey for Difficulty {
    const KEY: &'static str = "pexeso:difficulty";
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Select(Pos),
    Start,
    Restart,
    ChangeDifficulty(Difficulty),
    Run(Task),
}

fn card_classes(view: CardView, locked: bool) -> Classes {
    let mut class = classes!(
        "card",
        match view {
            CardView::Hidden => classes!(),
            CardView::Shown(_) => classes!("shown"),
            CardView::Matched(_) => classes!("shown", "matched"),
        }
    );
    if locked {
        class.push("locked");
    }
    class
}

/// Grid layout follows the dealt board, which keeps its size until the next deal.
fn board_classes(snapshot: &game::Snapshot) -> Classes {
    let layout = Difficulty::ALL
        .into_iter()
        .find(|difficulty| difficulty.total_pairs() == snapshot.total_pairs)
        .unwrap_or(snapshot.difficulty);
    classes!("board", layout.as_str(), snapshot.is_locked().then_some("locked"))
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    pos: Pos,
    view: CardView,
    #[prop_or_default]
    locked: bool,
    callback: Callback<Pos>,
}

#[function_component(CardTile)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        pos,
        view,
        locked,
        callback,
    } = props.clone();

    let class = card_classes(view, locked);

    // matched cards no longer take clicks
    let onclick = (!matches!(view, CardView::Matched(_))).then(|| {
        Callback::from(move |_: MouseEvent| {
            log::trace!("card {} clicked", pos);
            callback.emit(pos);
        })
    });

    let face = match view {
        CardView::Hidden => html! {},
        CardView::Shown(symbol) | CardView::Matched(symbol) => html! {
            <span>{symbol.glyph()}</span>
        },
    };

    html! {
        <li {class} {onclick}>{face}</li>
    }
}

#[derive(Properties, Clone, Debug, Default, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
    /// Start on this difficulty instead of the saved one
    #[prop_or_default]
    pub difficulty: Option<Difficulty>,
}

pub(crate) struct GameView {
    game: GameController<WebScheduler, LocalBestScores>,
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let difficulty = props
            .difficulty
            .unwrap_or_else(LocalOrDefault::local_or_default);
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("game on {} with seed {}", difficulty, seed);

        let scheduler = WebScheduler::new(ctx.link().callback(Msg::Run));
        Self {
            game: GameController::new(difficulty, scheduler, LocalBestScores, seed),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Select(pos) => match self.game.select_card(pos) {
                Ok(outcome) => {
                    log::trace!("select {}: {:?}", pos, outcome);
                    outcome.has_update()
                }
                Err(err) => {
                    log::warn!("select {}: {}", pos, err);
                    false
                }
            },
            Start => match self.game.start() {
                Ok(generation) => {
                    log::debug!("started {:?}", generation);
                    true
                }
                Err(err) => {
                    log::debug!("start ignored: {}", err);
                    false
                }
            },
            Restart => {
                let generation = self.game.restart();
                log::debug!("restarted {:?}", generation);
                true
            }
            ChangeDifficulty(difficulty) => {
                difficulty.local_save();
                self.game.configure(difficulty);
                true
            }
            Run(task) => self.game.run(task),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let snapshot = self.game.snapshot();
        let controls = snapshot.controls;
        let locked = snapshot.is_locked();

        let cb_start = ctx.link().callback(|_: MouseEvent| Msg::Start);
        let cb_restart = ctx.link().callback(|_: MouseEvent| Msg::Restart);
        let cb_difficulty = ctx.link().batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<Difficulty>() {
                Ok(difficulty) => Some(Msg::ChangeDifficulty(difficulty)),
                Err(err) => {
                    log::warn!("difficulty {:?}: {}", select.value(), err);
                    None
                }
            }
        });
        let cb_select = ctx.link().callback(Msg::Select);

        let best = snapshot
            .best_score
            .map_or_else(|| "--".to_string(), |best| best.to_string());

        let banner = match snapshot.summary {
            Some(game::WinSummary {
                moves,
                elapsed_secs,
            }) => html! {
                <section class="banner win">
                    <h2>{"You won!"}</h2>
                    <p>{format!("{} moves in {}", moves, game::format_clock(elapsed_secs))}</p>
                </section>
            },
            None => html! {},
        };

        html! {
            <div class="pexeso">
                <nav>
                    <select
                        onchange={cb_difficulty}
                        disabled={!controls.contains(Controls::DIFFICULTY)}
                    >
                        {
                            for Difficulty::ALL.into_iter().map(|difficulty| html! {
                                <option
                                    value={difficulty.as_str()}
                                    selected={difficulty == snapshot.difficulty}
                                >
                                    {difficulty.label()}
                                </option>
                            })
                        }
                    </select>
                    <button onclick={cb_start} disabled={!controls.contains(Controls::START)}>
                        {"Start"}
                    </button>
                    <button onclick={cb_restart} disabled={!controls.contains(Controls::RESTART)}>
                        {"Restart"}
                    </button>
                </nav>
                <dl>
                    <dt>{"Moves"}</dt><dd>{snapshot.moves.to_string()}</dd>
                    <dt>{"Pairs"}</dt><dd>{format!("{}/{}", snapshot.matches, snapshot.total_pairs)}</dd>
                    <dt>{"Time"}</dt><dd>{snapshot.clock()}</dd>
                    <dt>{"Best"}</dt><dd>{best}</dd>
                </dl>
                <ul class={board_classes(&snapshot)}>
                    {
                        for snapshot.cards.iter().enumerate().map(|(index, &view)| {
                            let pos = index as Pos;
                            let callback = cb_select.clone();
                            html! {
                                <CardTile {pos} {view} {locked} {callback}/>
                            }
                        })
                    }
                </ul>
                {banner}
            </div>
        }
    }
}
