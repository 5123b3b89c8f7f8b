use clap::Parser;
use tracing_subscriber::EnvFilter;

use shopfile::cli::commands::{
    CartCommand, Cli, Command, OrderCommand, ProductCommand, ReviewCommand, UserCommand,
    WishlistCommand,
};
use shopfile::cli::output;
use shopfile::config::Config;
use shopfile::error::{Result, ShopError};
use shopfile::models::payment::PayMethod;
use shopfile::models::product::ProductDraft;
use shopfile::operations::{accounts, cart, catalog, orders, payments, reviews, wishlist};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::new(&cli.data_dir);

    if let Err(e) = run(&config, cli.command) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

fn run(config: &Config, command: Command) -> Result<()> {
    config.ensure_dirs()?;
    match command {
        Command::Register {
            username,
            password,
            email,
        } => {
            let user = accounts::register(config, &username, &password, &email)?;
            println!("{}", output::format_json(&user));
            Ok(())
        }
        Command::Login { username, password } => {
            let user = accounts::login(config, &username, &password)?;
            println!("{}", output::format_json(&user));
            Ok(())
        }
        Command::Product(cmd) => run_product(config, cmd),
        Command::Cart(cmd) => run_cart(config, cmd),
        Command::Wishlist(cmd) => run_wishlist(config, cmd),
        Command::Order(cmd) => run_order(config, cmd),
        Command::Pay {
            order,
            user,
            amount,
            method,
        } => cmd_pay(config, order, user, amount, &method),
        Command::Review(cmd) => run_review(config, cmd),
        Command::User(cmd) => run_user(config, cmd),
    }
}

fn run_product(config: &Config, command: ProductCommand) -> Result<()> {
    match command {
        ProductCommand::Add {
            name,
            category,
            price,
            stock,
        } => {
            let id = catalog::add_product(
                config,
                &ProductDraft {
                    name,
                    category,
                    price,
                    stock,
                },
            )?;
            let product = catalog::get_product(config, id)
                .ok_or(ShopError::ProductNotFound { id })?;
            println!("{}", output::format_json(&product));
            Ok(())
        }
        ProductCommand::Show { id } => {
            let product =
                catalog::get_product(config, id).ok_or(ShopError::ProductNotFound { id })?;
            println!("{}", output::format_json(&product));
            Ok(())
        }
        ProductCommand::List => {
            println!("{}", output::format_json(&catalog::list_products(config)));
            Ok(())
        }
        ProductCommand::Search {
            name,
            category,
            price_min,
            price_max,
            min_rating,
        } => {
            let filter = catalog::ProductFilter {
                name_contains: name,
                category,
                price_min,
                price_max,
                min_rating,
            };
            let hits = catalog::search_products(config, &filter)?;
            println!("{}", output::format_json(&hits));
            Ok(())
        }
        ProductCommand::Edit {
            id,
            name,
            category,
            price,
            stock,
        } => {
            catalog::edit_product(
                config,
                id,
                &ProductDraft {
                    name,
                    category,
                    price,
                    stock,
                },
            )?;
            println!("{{\"ok\":true}}");
            Ok(())
        }
        ProductCommand::Remove { id } => {
            catalog::remove_product(config, id)?;
            println!("{{\"ok\":true}}");
            Ok(())
        }
        ProductCommand::Inventory => {
            println!("{}", output::format_json(&catalog::inventory(config)));
            Ok(())
        }
    }
}

fn run_cart(config: &Config, command: CartCommand) -> Result<()> {
    match command {
        CartCommand::Add { user, product, qty } => {
            cart::add_to_cart(config, user, product, qty)?;
            println!("{{\"ok\":true}}");
            Ok(())
        }
        CartCommand::Remove { user, product } => {
            cart::remove_from_cart(config, user, product)?;
            println!("{{\"ok\":true}}");
            Ok(())
        }
        CartCommand::View { user } => {
            println!("{}", output::format_json(&cart::view_cart(config, user)?));
            Ok(())
        }
        CartCommand::Clear { user } => {
            cart::clear_cart(config, user)?;
            println!("{{\"ok\":true}}");
            Ok(())
        }
    }
}

fn run_wishlist(config: &Config, command: WishlistCommand) -> Result<()> {
    match command {
        WishlistCommand::Add { user, product } => {
            wishlist::add_to_wishlist(config, user, product)?;
            println!("{{\"ok\":true}}");
            Ok(())
        }
        WishlistCommand::Remove { user, product } => {
            wishlist::remove_from_wishlist(config, user, product)?;
            println!("{{\"ok\":true}}");
            Ok(())
        }
        WishlistCommand::View { user } => {
            println!(
                "{}",
                output::format_json(&wishlist::view_wishlist(config, user)?)
            );
            Ok(())
        }
    }
}

fn run_order(config: &Config, command: OrderCommand) -> Result<()> {
    match command {
        OrderCommand::Place { user } => {
            let order = orders::place_order(config, user)?;
            println!("{}", output::format_json(&order));
            Ok(())
        }
        OrderCommand::Track { id } => {
            println!("{}", output::format_json(&orders::track_order(config, id)?));
            Ok(())
        }
        OrderCommand::List { user } => {
            let list = match user {
                Some(user_id) => orders::orders_for_user(config, user_id),
                None => orders::list_orders(config),
            };
            println!("{}", output::format_json(&list));
            Ok(())
        }
        OrderCommand::Status { id, status } => {
            orders::update_status(config, id, &status)?;
            println!("{{\"ok\":true}}");
            Ok(())
        }
    }
}

fn cmd_pay(config: &Config, order: u32, user: u32, amount: f64, method: &str) -> Result<()> {
    let method = PayMethod::parse(method).ok_or_else(|| {
        ShopError::Validation(format!(
            "unknown payment method {method:?} (expected visa, mastercard, jazzcash, easypaisa or paypak)"
        ))
    })?;
    let payment = payments::record_payment(config, order, user, amount, method)?;
    println!("{}", output::format_json(&payment));
    Ok(())
}

fn run_review(config: &Config, command: ReviewCommand) -> Result<()> {
    match command {
        ReviewCommand::Add {
            product,
            user,
            rating,
            comment,
        } => {
            reviews::add_review(config, product, user, rating, &comment)?;
            println!("{{\"ok\":true}}");
            Ok(())
        }
        ReviewCommand::List { product } => {
            println!(
                "{}",
                output::format_json(&reviews::reviews_for_product(config, product))
            );
            Ok(())
        }
        ReviewCommand::Eligible { user } => {
            println!(
                "{}",
                output::format_json(&reviews::reviewable_products(config, user))
            );
            Ok(())
        }
    }
}

fn run_user(config: &Config, command: UserCommand) -> Result<()> {
    match command {
        UserCommand::List => {
            println!("{}", output::format_json(&accounts::list_users(config)));
            Ok(())
        }
        UserCommand::Edit {
            id,
            username,
            email,
        } => {
            accounts::update_user(config, id, username.as_deref(), email.as_deref())?;
            println!("{{\"ok\":true}}");
            Ok(())
        }
        UserCommand::Remove { id, admin } => {
            accounts::remove_user(config, id, admin)?;
            println!("{{\"ok\":true}}");
            Ok(())
        }
    }
}
