use {
    crate::app::preview::{calculate_buy_tokens, calculate_sell_usdt},
    crate::app::view::DashboardView,
    crate::constants::{MIN_TERMINAL_HEIGHT, TOAST_TTL_SECS},
    crate::libs::config::{load_env, Config},
    crate::libs::network::{
        select_network, switch_or_stay, ChainRegistry, NetworkDescriptor, BSC_MAINNET, BSC_TESTNET,
    },
    crate::libs::tui::{
        draw_box, draw_input, draw_status, draw_tab_strip, draw_title_bar, BoxProps, Theme,
        ToastLevel,
    },
    crate::libs::wallet::WalletSession,
    crate::libs::writing::cc,
    crate::log,
    crate::swap::{Side, SwapDesk, SwapError, TradeDesk, TradeReport},
    alloy::providers::Provider,
    anyhow::Result,
    crossterm::{
        event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    futures_util::{future::LocalBoxFuture, StreamExt},
    ratatui::prelude::*,
    std::collections::VecDeque,
    std::time::{Duration, Instant},
};

const TAB_LABELS: [&str; 2] = ["BUY", "SELL"];

/// What the event loop hands back to `init`: either we are done, or the
/// user picked another network and the provider stack must be rebuilt.
enum Flow {
    Quit,
    Switch(&'static NetworkDescriptor),
}

pub async fn init() -> Result<()> {
    load_env();
    let config = Config::new();

    // Hard precondition: without a wallet nothing below can run.
    let session = WalletSession::connect(&config)?;
    log!(cc::LIGHT_GREEN, "wallet connected: {}", session.address);

    let registry = ChainRegistry::new();
    let mut network: &'static NetworkDescriptor = &BSC_MAINNET;

    // Startup only; later switches are verified by the toggle handler
    // before the stack is rebuilt.
    if let Err(e) = select_network(&registry, network).await {
        log!(cc::LIGHT_RED, "initial network select failed: {}", e);
    }

    loop {
        let provider = session.provider(network, config.bsc_rpc.as_deref())?;
        let desk = SwapDesk::new(provider);
        let trade = TradeDesk::new(desk.clone(), session.address);

        let mut app = App::new(&session, network, &registry, desk, trade);
        match app.run_tui().await? {
            Flow::Quit => return Ok(()),
            Flow::Switch(next) => network = next,
        }
    }
}

struct Toast {
    text: String,
    level: ToastLevel,
}

/// Status-line notifications in arrival order. The front entry is on
/// screen; each entry gets its own display window once it reaches the
/// front, so rapid events do not overwrite each other.
struct ToastQueue {
    items: VecDeque<Toast>,
    shown_at: Option<Instant>,
}

impl ToastQueue {
    fn new() -> Self {
        Self {
            items: VecDeque::new(),
            shown_at: None,
        }
    }

    fn push(&mut self, text: impl Into<String>, level: ToastLevel) {
        if self.items.is_empty() {
            self.shown_at = Some(Instant::now());
        }
        self.items.push_back(Toast {
            text: text.into(),
            level,
        });
    }

    fn current(&self) -> Option<&Toast> {
        self.items.front()
    }

    /// Rotate past the front entry once its window is over, as of `now`.
    fn expire(&mut self, now: Instant) {
        let Some(shown) = self.shown_at else { return };
        if now.duration_since(shown) > Duration::from_secs(*TOAST_TTL_SECS) {
            self.items.pop_front();
            self.shown_at = if self.items.is_empty() {
                None
            } else {
                Some(now)
            };
        }
    }
}

struct App<'a, P: Provider + Clone + 'static> {
    network: &'static NetworkDescriptor,
    registry: &'a ChainRegistry,
    desk: SwapDesk<P>,
    trade: TradeDesk<SwapDesk<P>>,
    view: DashboardView,
    tab: usize,
    buy_amount: String,
    sell_amount: String,
    toasts: ToastQueue,
    pending: Option<LocalBoxFuture<'static, Result<TradeReport, SwapError>>>,
}

impl<'a, P: Provider + Clone + 'static> App<'a, P> {
    fn new(
        session: &WalletSession,
        network: &'static NetworkDescriptor,
        registry: &'a ChainRegistry,
        desk: SwapDesk<P>,
        trade: TradeDesk<SwapDesk<P>>,
    ) -> Self {
        let view = DashboardView {
            wallet_address: Some(session.address),
            ..DashboardView::default()
        };
        Self {
            network,
            registry,
            desk,
            trade,
            view,
            tab: 0,
            buy_amount: String::new(),
            sell_amount: String::new(),
            toasts: ToastQueue::new(),
            pending: None,
        }
    }

    fn raise(&mut self, text: impl Into<String>, level: ToastLevel) {
        self.toasts.push(text, level);
    }

    /// Pull quote and balances. Each failed batch keeps prior state and
    /// surfaces one toast; nothing is retried.
    async fn refresh(&mut self) {
        if let Err(e) = self.view.refresh_quote(&self.desk).await {
            log!(cc::LIGHT_RED, "quote refresh failed: {}", e);
            self.raise("Failed to fetch contract prices", ToastLevel::Error);
        }
        if let Err(e) = self.view.refresh_balances(&self.desk).await {
            log!(cc::LIGHT_RED, "balance refresh failed: {}", e);
        }
    }

    fn amount_mut(&mut self) -> &mut String {
        if self.tab == 0 {
            &mut self.buy_amount
        } else {
            &mut self.sell_amount
        }
    }

    fn submit(&mut self) {
        let side = if self.tab == 0 { Side::Buy } else { Side::Sell };
        let amount = if side == Side::Buy {
            self.buy_amount.clone()
        } else {
            self.sell_amount.clone()
        };

        // Presentation-side guard, same as the desk's own parse.
        if amount.trim().parse::<f64>().map_or(true, |v| v <= 0.0) {
            self.raise("Please enter a valid amount", ToastLevel::Error);
            return;
        }
        if self.pending.is_some() || self.trade.is_busy() {
            self.raise("A trade is already processing", ToastLevel::Info);
            return;
        }

        let trade = self.trade.clone();
        self.view.busy = true;
        self.pending = Some(Box::pin(
            async move { trade.execute(side, &amount).await },
        ));
    }

    fn on_trade_done(&mut self, res: Result<TradeReport, SwapError>) {
        match res {
            Ok(report) => {
                self.view.absorb(&report);
                match report.side {
                    Side::Buy => {
                        self.buy_amount.clear();
                        self.raise("Tokens purchased successfully!", ToastLevel::Success);
                    }
                    Side::Sell => {
                        self.sell_amount.clear();
                        self.raise("Tokens sold successfully!", ToastLevel::Success);
                    }
                }
                if report.quote.is_none() || report.balances.is_none() {
                    self.raise("Failed to refresh after the trade", ToastLevel::Error);
                }
            }
            Err(e) => {
                log!(cc::LIGHT_RED, "trade failed: {}", e);
                // A declined signature is an intentional user action,
                // not something to toast about.
                if !e.is_user_rejection() {
                    self.raise(e.to_string(), ToastLevel::Error);
                }
            }
        }
    }

    /// `Some(flow)` ends the loop.
    async fn on_key(&mut self, code: KeyCode, mods: KeyModifiers) -> Option<Flow> {
        match code {
            KeyCode::Char('c') if mods.contains(KeyModifiers::CONTROL) => return Some(Flow::Quit),
            KeyCode::Char('q') | KeyCode::Esc => return Some(Flow::Quit),
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                self.tab = 1 - self.tab;
            }
            KeyCode::Char('n') => {
                if self.pending.is_some() {
                    self.raise("Cannot switch networks mid-trade", ToastLevel::Info);
                    return None;
                }
                let next: &'static NetworkDescriptor =
                    if self.network.chain_id == BSC_MAINNET.chain_id {
                        &BSC_TESTNET
                    } else {
                        &BSC_MAINNET
                    };
                // The stack is only rebuilt once the wallet actually
                // moved; otherwise the session stays where it is.
                let (chosen, err) = switch_or_stay(self.registry, self.network, next).await;
                match err {
                    None => return Some(Flow::Switch(chosen)),
                    Some(e) => {
                        log!(cc::LIGHT_RED, "network switch failed: {}", e);
                        self.raise(
                            format!("Failed to switch to {}", next.chain_name),
                            ToastLevel::Error,
                        );
                    }
                }
            }
            KeyCode::Char('r') => {
                self.refresh().await;
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.amount_mut().pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                self.amount_mut().push(c);
            }
            _ => {}
        }
        None
    }

    async fn run_tui(&mut self) -> Result<Flow> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        // Initial pull: quote unconditionally, balances for the session
        // address. Also re-run after every network change since the
        // whole stack is rebuilt around this loop.
        self.refresh().await;

        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(Duration::from_millis(100));

        let flow = loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            if let Some(flow) = self.on_key(key.code, key.modifiers).await {
                                break flow;
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            log!(cc::LIGHT_RED, "terminal event error: {}", e);
                        }
                        None => break Flow::Quit,
                    }
                }
                res = async { self.pending.as_mut().unwrap().await }, if self.pending.is_some() => {
                    self.pending = None;
                    self.view.busy = false;
                    self.on_trade_done(res);
                }
                _ = ticker.tick() => {
                    self.toasts.expire(Instant::now());
                }
            }
        };

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(flow)
    }

    fn draw(&self, f: &mut Frame) {
        let theme = Theme::vst_dark();
        let area = f.area();
        if area.height < *MIN_TERMINAL_HEIGHT {
            let msg = format!(
                "Terminal too small ({} rows, need {})",
                area.height, *MIN_TERMINAL_HEIGHT
            );
            f.render_widget(
                ratatui::widgets::Paragraph::new(msg).style(Style::default().fg(theme.bad)),
                area,
            );
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        draw_title_bar(
            f,
            rows[0],
            "VST Desk",
            &format!("{} | {}", self.network.chain_name, self.view.address_short()),
            "tab: buy/sell  n: network  r: refresh  q: quit",
        );

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[1]);

        self.draw_left(f, cols[0], &theme);
        self.draw_trade_panel(f, cols[1], &theme);

        let (text, level) = match self.toasts.current() {
            Some(t) => (t.text.as_str(), t.level),
            None if self.view.busy => ("Processing...", ToastLevel::Info),
            None => ("Ready", ToastLevel::Info),
        };
        draw_status(f, rows[2], text, level);
    }

    fn draw_left(&self, f: &mut Frame, col: Rect, theme: &Theme) {
        let q = &self.view.quote;
        let market_lines = vec![
            Line::from(format!("Buy Price:  {} USDT / VST", q.buy_price)),
            Line::from(format!("Sell Price: {} USDT / VST", q.sell_price)),
            Line::from(format!("Buy Fee:    {} USDT", q.buy_fee)),
            Line::from(format!("Sell Fee:   {} USDT", q.sell_fee)),
            Line::from(format!("Min Swap:   {}", q.min_swap)),
            Line::from(format!("Max Daily:  {}", q.max_daily_swap)),
        ];
        let used = draw_box(
            f,
            col,
            market_lines,
            &BoxProps {
                border_color: theme.accent,
                title: "Market".into(),
            },
        );

        let b = &self.view.balances;
        let wallet_lines = vec![
            Line::from(format!("Address: {}", self.view.address_short())),
            Line::from(vec![
                Span::raw("USDT: "),
                Span::styled(b.usdt.clone(), Style::default().fg(theme.usdt)),
            ]),
            Line::from(vec![
                Span::raw("VST:  "),
                Span::styled(b.vst.clone(), Style::default().fg(theme.vst)),
            ]),
            Line::from(format!("Network: {}", self.network.chain_name)),
        ];
        let below = Rect {
            x: col.x,
            y: col.y.saturating_add(used),
            width: col.width,
            height: col.height.saturating_sub(used),
        };
        draw_box(
            f,
            below,
            wallet_lines,
            &BoxProps {
                border_color: theme.muted,
                title: "Wallet".into(),
            },
        );
    }

    fn draw_trade_panel(&self, f: &mut Frame, col: Rect, theme: &Theme) {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(4),
            ])
            .split(col);

        draw_tab_strip(f, parts[0], &TAB_LABELS, self.tab);

        let q = &self.view.quote;
        let (amount, label, preview_line) = if self.tab == 0 {
            let recv = calculate_buy_tokens(&self.buy_amount, &q.buy_price, &q.buy_fee);
            (
                &self.buy_amount,
                "USDT Amount",
                format!("You will receive: {} VST", recv),
            )
        } else {
            let recv = calculate_sell_usdt(&self.sell_amount, &q.sell_price, &q.sell_fee);
            (
                &self.sell_amount,
                "VST Amount",
                format!("You will receive: {} USDT", recv),
            )
        };

        let (price, fee) = if self.tab == 0 {
            (&q.buy_price, &q.buy_fee)
        } else {
            (&q.sell_price, &q.sell_fee)
        };
        let terms = vec![
            Line::from(format!("Price:   {} USDT per VST", price)),
            Line::from(format!("Charges: {} USDT", fee)),
        ];
        draw_box(
            f,
            parts[1],
            terms,
            &BoxProps {
                border_color: theme.muted,
                title: if self.tab == 0 {
                    "Buy Order".into()
                } else {
                    "Sell Order".into()
                },
            },
        );

        draw_input(f, parts[2], label, amount, !self.view.busy);

        let hint = if self.view.busy {
            Line::styled("Processing...", Style::default().fg(theme.muted))
        } else {
            Line::styled(
                format!("{}  (Enter to submit)", preview_line),
                Style::default().fg(theme.accent),
            )
        };
        f.render_widget(ratatui::widgets::Paragraph::new(hint), parts[3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_window_rotates_through_the_queue() {
        let mut q = ToastQueue::new();
        let t0 = Instant::now();
        let ttl = Duration::from_secs(*TOAST_TTL_SECS);

        q.push("first", ToastLevel::Info);
        q.push("second", ToastLevel::Error);
        q.push("third", ToastLevel::Success);
        // Later pushes queue up behind the one on screen.
        assert_eq!(q.current().unwrap().text, "first");

        // Still inside the first window.
        q.expire(t0);
        assert_eq!(q.current().unwrap().text, "first");

        q.expire(t0 + ttl * 2);
        assert_eq!(q.current().unwrap().text, "second");
        assert_eq!(q.current().unwrap().level, ToastLevel::Error);

        q.expire(t0 + ttl * 4);
        assert_eq!(q.current().unwrap().text, "third");
        q.expire(t0 + ttl * 6);
        assert!(q.current().is_none());
    }

    #[test]
    fn push_onto_an_empty_queue_opens_a_fresh_window() {
        let mut q = ToastQueue::new();
        let ttl = Duration::from_secs(*TOAST_TTL_SECS);

        q.push("one", ToastLevel::Info);
        q.expire(Instant::now() + ttl * 2);
        assert!(q.current().is_none());

        q.push("two", ToastLevel::Info);
        q.expire(Instant::now());
        assert_eq!(q.current().unwrap().text, "two");
    }
}
