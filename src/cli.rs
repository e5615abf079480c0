//! Command-line front end over the command layer.

use crate::auth::Credentials;
use crate::commands::{admin, auth, contact, gallery};
use crate::config;
use crate::contact::ContactRequest;
use crate::lightbox::{
    HttpPrefetcher, InputEvent, Key, LightboxController, LightboxEvent, LightboxView,
    MediaSurface, NoScrollLock,
};
use crate::media::model::{CategoryCard, MediaType};
use crate::notify::TracingNotifier;
use crate::resolver::{
    classify_host, to_embed_url, to_thumbnail_url, to_video_thumbnail, ThumbnailQuality,
    DEFAULT_THUMBNAIL_WIDTH,
};
use crate::state::AppState;
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "reelfolio")]
#[command(about = "Photography and videography portfolio tools", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every derived form of a media link
    Resolve {
        url: String,
        #[arg(short = 't', long, default_value = "photo")]
        media_type: MediaType,
        #[arg(short, long, default_value = "high")]
        quality: ThumbnailQuality,
    },
    /// List the landing-page category cards
    Categories,
    /// List one category's gallery
    Gallery { slug: String },
    /// Step through a category in a terminal lightbox
    Browse {
        slug: String,
        #[arg(short, long, default_value_t = 0)]
        start: usize,
    },
    /// Manage portfolio items (admin only)
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// Send a message through the contact relay
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        event_type: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(clap::Args)]
pub struct AdminLogin {
    #[arg(long, env = "REELFOLIO_ADMIN_EMAIL")]
    pub email: String,
    #[arg(long, env = "REELFOLIO_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(clap::Args)]
pub struct ItemArgs {
    #[arg(short = 't', long)]
    pub media_type: MediaType,
    #[arg(short, long)]
    pub category: String,
    #[arg(short, long)]
    pub url: String,
    #[arg(long)]
    pub full_url: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
}

impl From<ItemArgs> for admin::AdminForm {
    fn from(args: ItemArgs) -> Self {
        admin::AdminForm {
            media_type: args.media_type,
            category: args.category,
            url: args.url,
            full_url: args.full_url,
            title: args.title,
        }
    }
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Create an account; the first admin is bootstrapped this way
    CreateUser {
        #[command(flatten)]
        login: AdminLogin,
        #[arg(long)]
        admin: bool,
    },
    List {
        #[command(flatten)]
        login: AdminLogin,
    },
    Add {
        #[command(flatten)]
        login: AdminLogin,
        #[command(flatten)]
        item: ItemArgs,
    },
    Edit {
        #[command(flatten)]
        login: AdminLogin,
        id: String,
        #[command(flatten)]
        item: ItemArgs,
    },
    Delete {
        #[command(flatten)]
        login: AdminLogin,
        id: String,
    },
    /// Manage landing-page category cards
    Card {
        #[command(subcommand)]
        command: CardCommand,
    },
}

#[derive(Subcommand)]
pub enum CardCommand {
    /// Create or replace the card for a category
    Set {
        #[command(flatten)]
        login: AdminLogin,
        slug: String,
        /// Defaults to the catalogue label
        #[arg(long, default_value = "")]
        label: String,
        #[arg(long)]
        thumbnail: Option<String>,
        #[arg(long, default_value_t = 0)]
        order: i64,
    },
}

impl AdminLogin {
    fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

pub fn execute(cli: Cli) -> Result<()> {
    let home = config::reelfolio_home()?;
    let state = AppState::new(home);
    match cli.command {
        Commands::Resolve {
            url,
            media_type,
            quality,
        } => resolve(&url, media_type, quality),
        Commands::Categories => {
            let cards = gallery::list_category_cards(&state).map_err(|e| anyhow!(e))?;
            let counts = gallery::category_counts(&state).map_err(|e| anyhow!(e))?;
            for card in &cards {
                let count = counts
                    .iter()
                    .find(|c| c.slug == card.slug)
                    .map_or(0, |c| c.item_count);
                println!(
                    "{:>2}. {} ({}): {} {}",
                    card.display_order,
                    card.display_label,
                    card.slug,
                    count,
                    if count == 1 { "item" } else { "items" }
                );
                if let Some(thumbnail) = &card.thumbnail_url {
                    println!("    {}", thumbnail);
                }
            }
            Ok(())
        }
        Commands::Gallery { slug } => {
            let page = gallery::list_gallery(slug, &state).map_err(|e| anyhow!(e))?;
            println!("{} ({})", page.label, page.count_label);
            for tile in &page.tiles {
                let kind = if tile.is_video { "video" } else { "photo" };
                println!(
                    "  [{}] {} {} {}",
                    tile.index,
                    kind,
                    tile.item.title.as_deref().unwrap_or("-"),
                    tile.thumbnail_url
                );
            }
            Ok(())
        }
        Commands::Browse { slug, start } => browse(&state, slug, start),
        Commands::Admin { command } => run_admin(&state, command),
        Commands::Contact {
            name,
            email,
            phone,
            event_type,
            message,
        } => {
            let relay = contact::relay_from_config(&state).map_err(|e| anyhow!(e))?;
            let request = ContactRequest {
                name,
                email,
                phone,
                event_type,
                message,
            };
            if contact::submit_contact(&request, &relay, &TracingNotifier) {
                Ok(())
            } else {
                Err(anyhow!("message was not sent"))
            }
        }
    }
}

fn resolve(url: &str, media_type: MediaType, quality: ThumbnailQuality) -> Result<()> {
    println!("host:       {:?}", classify_host(url));
    println!("embed:      {}", to_embed_url(url));
    println!(
        "thumbnail:  {}",
        to_thumbnail_url(url, media_type, DEFAULT_THUMBNAIL_WIDTH)
    );
    if let Some(still) = to_video_thumbnail(url, quality) {
        println!("video still: {}", still);
    }
    Ok(())
}

fn run_admin(state: &AppState, command: AdminCommand) -> Result<()> {
    let notifier = TracingNotifier;
    let sign_in = |login: &AdminLogin| {
        auth::sign_in(login.credentials(), state, &notifier).map_err(|e| anyhow!(e))
    };
    match command {
        AdminCommand::CreateUser { login, admin } => {
            let user = auth::create_user(login.credentials(), admin, state).map_err(|e| anyhow!(e))?;
            print_json(&user)
        }
        AdminCommand::List { login } => {
            sign_in(&login)?;
            let items = admin::list_items(state, &notifier).map_err(|e| anyhow!(e))?;
            print_json(&items)
        }
        AdminCommand::Add { login, item } => {
            sign_in(&login)?;
            let saved = admin::save_item(None, item.into(), state, &notifier).map_err(|e| anyhow!(e))?;
            print_json(&saved)
        }
        AdminCommand::Edit { login, id, item } => {
            sign_in(&login)?;
            let saved =
                admin::save_item(Some(id), item.into(), state, &notifier).map_err(|e| anyhow!(e))?;
            print_json(&saved)
        }
        AdminCommand::Delete { login, id } => {
            sign_in(&login)?;
            admin::delete_item(id, state, &notifier).map_err(|e| anyhow!(e))
        }
        AdminCommand::Card {
            command:
                CardCommand::Set {
                    login,
                    slug,
                    label,
                    thumbnail,
                    order,
                },
        } => {
            sign_in(&login)?;
            let card = CategoryCard {
                slug,
                display_label: label,
                thumbnail_url: thumbnail,
                display_order: order,
            };
            let saved = admin::set_category_card(card, state, &notifier).map_err(|e| anyhow!(e))?;
            print_json(&saved)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ── Terminal lightbox ─────────────────────────────────────────────────────────

const BROWSE_HELP: &str =
    "commands: n | p | esc | play | zoom | swipe <start> <end> | show | help";

enum BrowseCommand {
    Input(InputEvent),
    Swipe(f32, f32),
    Show,
    Help,
}

fn parse_browse_command(line: &str) -> Option<BrowseCommand> {
    let mut words = line.split_whitespace();
    let word = words.next().unwrap_or("");
    // Shorthands resolve to DOM key names; full names such as `ArrowLeft` work too.
    let key_name = match word {
        "n" | "next" => "ArrowRight",
        "p" | "prev" => "ArrowLeft",
        "esc" | "q" | "close" => "Escape",
        other => other,
    };
    let key = Key::from_name(key_name);
    if key != Key::Other {
        return Some(BrowseCommand::Input(InputEvent::Key(key)));
    }
    let command = match word {
        "play" => BrowseCommand::Input(InputEvent::PlayClicked),
        "zoom" => BrowseCommand::Input(InputEvent::ImageClicked),
        "swipe" => {
            let start = words.next()?.parse().ok()?;
            let end = words.next()?.parse().ok()?;
            BrowseCommand::Swipe(start, end)
        }
        "show" | "" => BrowseCommand::Show,
        "help" | "?" => BrowseCommand::Help,
        _ => return None,
    };
    Some(command)
}

fn browse(state: &AppState, slug: String, start: usize) -> Result<()> {
    let page = gallery::list_gallery(slug, state).map_err(|e| anyhow!(e))?;
    let (prefetcher, results) = HttpPrefetcher::new().context("cannot build prefetch client")?;
    let mut lightbox = LightboxController::new(prefetcher, Rc::new(NoScrollLock));
    lightbox.open(page.items, start)?;
    println!("{} ({})", page.label, page.count_label);
    println!("{}", BROWSE_HELP);
    print_view(lightbox.view().as_ref());

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    while lightbox.is_open() {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        // Apply whatever finished while we were waiting for input.
        let mut changed = false;
        for result in results.try_iter() {
            changed |= lightbox.apply_load_result(result);
        }

        let event = match parse_browse_command(line.trim()) {
            Some(BrowseCommand::Input(input)) => lightbox.handle_input(input),
            Some(BrowseCommand::Swipe(from, to)) => {
                lightbox.handle_input(InputEvent::TouchStart { x: from });
                lightbox.handle_input(InputEvent::TouchEnd { x: to })
            }
            Some(BrowseCommand::Show) => {
                changed = true;
                None
            }
            Some(BrowseCommand::Help) => {
                println!("{}", BROWSE_HELP);
                None
            }
            None => {
                println!("unknown command; {}", BROWSE_HELP);
                None
            }
        };
        match event {
            Some(LightboxEvent::Closed) => println!("closed"),
            Some(LightboxEvent::Navigated { .. }) => print_view(lightbox.view().as_ref()),
            None if changed => print_view(lightbox.view().as_ref()),
            None => {}
        }
    }
    lightbox.close();
    Ok(())
}

fn print_view(view: Option<&LightboxView>) {
    let Some(view) = view else {
        return;
    };
    println!(
        "[{}] {}",
        view.position_label,
        view.title.as_deref().unwrap_or("")
    );
    match &view.surface {
        MediaSurface::Photo {
            display_url,
            phase,
            zoomed,
            error,
            ..
        } => {
            println!("  photo {:?}{}: {}", phase, if *zoomed { " (zoomed)" } else { "" }, display_url);
            if let Some(error) = error {
                println!("  {}", error);
            }
        }
        MediaSurface::Video {
            poster_url,
            embed_url,
            player_url,
            ..
        } => match player_url {
            Some(url) => println!("  playing: {}", url),
            None => println!(
                "  video: {} (poster {})",
                embed_url,
                poster_url.as_deref().unwrap_or("none")
            ),
        },
    }
    if view.dots.overflow > 0 {
        println!("  +{} more", view.dots.overflow);
    }
}
