use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;
use studio_core::*;

#[derive(Parser)]
#[command(name = "studio")]
#[command(about = "Photo studio booking ledger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start a new store empty instead of with the sample records
    #[arg(long, global = true)]
    no_seed: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage clients
    #[command(subcommand)]
    Client(ClientCommand),

    /// Manage photographers
    #[command(subcommand)]
    Staff(StaffCommand),

    /// Manage rentable equipment
    #[command(subcommand)]
    Equipment(EquipmentCommand),

    /// Book and track sessions
    #[command(subcommand)]
    Session(SessionCommand),

    /// Session reports
    #[command(subcommand)]
    Report(ReportCommand),
}

#[derive(Args)]
struct ContactArgs {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "")]
    email: String,
}

impl From<ContactArgs> for Contact {
    fn from(args: ContactArgs) -> Self {
        Contact {
            first_name: args.first_name,
            last_name: args.last_name,
            phone: args.phone,
            email: args.email,
        }
    }
}

#[derive(Subcommand)]
enum ClientCommand {
    /// Register a client
    Add(ContactArgs),
    /// List all clients
    List,
    /// Show one client
    Show { id: u32 },
}

#[derive(Subcommand)]
enum StaffCommand {
    /// Register a photographer
    Add {
        #[command(flatten)]
        contact: ContactArgs,

        #[arg(long, default_value = "")]
        specialization: String,

        /// Hourly rate
        #[arg(long, value_parser = parse_amount)]
        rate: Decimal,

        /// Years of experience
        #[arg(long, default_value_t = 0)]
        experience: u32,
    },
    /// List all photographers
    List,
    /// Show one photographer
    Show { id: u32 },
}

#[derive(Subcommand)]
enum EquipmentCommand {
    /// Register an equipment item
    Add {
        #[arg(long)]
        name: String,

        /// primary_device (camera), optic (lens), lighting, backdrop or other
        #[arg(long, value_parser = parse_category)]
        category: EquipmentCategory,

        #[arg(long, default_value = "")]
        model: String,

        /// Rental price per hour
        #[arg(long, value_parser = parse_amount)]
        price: Decimal,

        #[arg(long)]
        condition: Option<String>,
    },
    /// List equipment
    List {
        /// Only show items that are free to book
        #[arg(long)]
        available: bool,
    },
    /// Show one item
    Show { id: u32 },
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Book a session and reserve its equipment
    Book {
        #[arg(long)]
        client: u32,

        #[arg(long)]
        staff: u32,

        /// Comma-separated equipment IDs
        #[arg(long, value_delimiter = ',')]
        equipment: Vec<u32>,

        /// YYYY-MM-DD or "YYYY-MM-DD HH:MM"
        #[arg(long, value_parser = parse_scheduled)]
        date: NaiveDateTime,

        /// Duration in whole hours
        #[arg(long)]
        hours: u32,

        #[arg(long = "type", default_value = "")]
        session_type: String,

        #[arg(long, default_value = "")]
        location: String,
    },
    /// Mark a planned session as in progress
    Start { id: u32 },
    /// Complete a session and release its equipment
    Complete { id: u32 },
    /// Cancel a session and release its equipment
    Cancel { id: u32 },
    /// List sessions, optionally for one client or photographer
    List {
        #[arg(long)]
        client: Option<u32>,

        #[arg(long)]
        staff: Option<u32>,
    },
    /// Show one session
    Show { id: u32 },
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Append all sessions to a CSV file
    Csv { path: PathBuf },
    /// Show session counts and revenue by status
    Summary,
}

fn parse_amount(s: &str) -> std::result::Result<Decimal, String> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid amount '{}': {}", s, e))
}

fn parse_category(s: &str) -> std::result::Result<EquipmentCategory, String> {
    s.parse::<EquipmentCategory>().map_err(|e| e.to_string())
}

fn parse_scheduled(s: &str) -> std::result::Result<NaiveDateTime, String> {
    let s = s.trim();
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(at);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD [HH:MM]", s))
}

/// Where the ledger lives and how it is opened
struct Context {
    store: SnapshotStore,
    policy: BookingPolicy,
    seed: bool,
}

impl Context {
    fn read(&self) -> Result<Ledger> {
        self.store.open(self.policy, self.seed)
    }

    fn update<T>(&self, f: impl FnOnce(&mut Ledger) -> Result<T>) -> Result<T> {
        self.store.update(self.policy, self.seed, f)
    }
}

fn main() -> ExitCode {
    studio_core::logging::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    let ctx = Context {
        store: SnapshotStore::new(config.snapshot_path(&data_dir)),
        policy: config.booking,
        seed: config.seed.sample_data && !cli.no_seed,
    };
    tracing::debug!("Using snapshot {:?}", ctx.store.path());

    match cli.command {
        Commands::Client(cmd) => cmd_client(&ctx, cmd),
        Commands::Staff(cmd) => cmd_staff(&ctx, cmd),
        Commands::Equipment(cmd) => cmd_equipment(&ctx, cmd),
        Commands::Session(cmd) => cmd_session(&ctx, cmd),
        Commands::Report(cmd) => cmd_report(&ctx, cmd),
    }
}

fn cmd_client(ctx: &Context, cmd: ClientCommand) -> Result<()> {
    match cmd {
        ClientCommand::Add(contact) => {
            let client = ctx.update(|ledger| {
                ledger.add_client(NewClient {
                    contact: contact.into(),
                })
            })?;
            println!("✓ Client added");
            print_client(&client);
        }
        ClientCommand::List => {
            let ledger = ctx.read()?;
            for client in ledger.clients() {
                print_client(client);
            }
        }
        ClientCommand::Show { id } => {
            let ledger = ctx.read()?;
            let client = ledger
                .find_client(ClientId(id))
                .ok_or_else(|| Error::not_found("client", id))?;
            print_client(client);
            println!("  Phone: {}  Email: {}", client.contact.phone, client.contact.email);
            println!("  Registered: {}", client.registered_at.format("%Y-%m-%d %H:%M"));
        }
    }
    Ok(())
}

fn cmd_staff(ctx: &Context, cmd: StaffCommand) -> Result<()> {
    match cmd {
        StaffCommand::Add {
            contact,
            specialization,
            rate,
            experience,
        } => {
            let staff = ctx.update(|ledger| {
                ledger.add_staff(NewStaff {
                    contact: contact.into(),
                    specialization,
                    hourly_rate: rate,
                    experience_years: experience,
                })
            })?;
            println!("✓ Photographer added");
            print_staff(&staff);
        }
        StaffCommand::List => {
            let ledger = ctx.read()?;
            for staff in ledger.staff() {
                print_staff(staff);
            }
        }
        StaffCommand::Show { id } => {
            let ledger = ctx.read()?;
            let staff = ledger
                .find_staff(StaffId(id))
                .ok_or_else(|| Error::not_found("staff", id))?;
            print_staff(staff);
            println!("  Phone: {}  Email: {}", staff.contact.phone, staff.contact.email);
        }
    }
    Ok(())
}

fn cmd_equipment(ctx: &Context, cmd: EquipmentCommand) -> Result<()> {
    match cmd {
        EquipmentCommand::Add {
            name,
            category,
            model,
            price,
            condition,
        } => {
            let item = ctx.update(|ledger| {
                ledger.add_equipment(NewEquipment {
                    name,
                    category,
                    model,
                    rental_price: price,
                    condition,
                })
            })?;
            println!("✓ Equipment added");
            print_equipment(&item);
        }
        EquipmentCommand::List { available } => {
            let ledger = ctx.read()?;
            let items: Vec<&Equipment> = if available {
                ledger.list_available_equipment()
            } else {
                ledger.equipment().iter().collect()
            };
            for item in items {
                print_equipment(item);
            }
        }
        EquipmentCommand::Show { id } => {
            let ledger = ctx.read()?;
            let item = ledger
                .find_equipment(EquipmentId(id))
                .ok_or_else(|| Error::not_found("equipment", id))?;
            print_equipment(item);
        }
    }
    Ok(())
}

fn cmd_session(ctx: &Context, cmd: SessionCommand) -> Result<()> {
    match cmd {
        SessionCommand::Book {
            client,
            staff,
            equipment,
            date,
            hours,
            session_type,
            location,
        } => {
            let request = BookingRequest {
                client_id: ClientId(client),
                staff_id: StaffId(staff),
                equipment_ids: equipment.into_iter().map(EquipmentId).collect(),
                scheduled_at: date,
                duration_hours: hours,
                session_type,
                location,
            };
            let session = ctx.update(|ledger| ledger.book_session(request))?;
            println!("✓ Session booked");
            print_session(&session);
        }
        SessionCommand::Start { id } => {
            let session = ctx.update(|ledger| ledger.start_session(SessionId(id)))?;
            println!("✓ Session started");
            print_session(&session);
        }
        SessionCommand::Complete { id } => {
            let session = ctx.update(|ledger| ledger.complete_session(SessionId(id)))?;
            println!("✓ Session completed, equipment released");
            print_session(&session);
        }
        SessionCommand::Cancel { id } => {
            let session = ctx.update(|ledger| ledger.cancel_session(SessionId(id)))?;
            println!("✓ Session cancelled, equipment released");
            print_session(&session);
        }
        SessionCommand::List { client, staff } => {
            let ledger = ctx.read()?;
            let sessions: Vec<&Session> = match (client, staff) {
                (Some(c), Some(s)) => ledger
                    .find_sessions_by_client(ClientId(c))
                    .into_iter()
                    .filter(|session| session.staff_id == StaffId(s))
                    .collect(),
                (Some(c), None) => ledger.find_sessions_by_client(ClientId(c)),
                (None, Some(s)) => ledger.find_sessions_by_staff(StaffId(s)),
                (None, None) => ledger.sessions().iter().collect(),
            };
            if sessions.is_empty() {
                println!("No sessions found.");
            }
            for session in sessions {
                print_session(session);
            }
        }
        SessionCommand::Show { id } => {
            let ledger = ctx.read()?;
            let session = ledger
                .find_session(SessionId(id))
                .ok_or_else(|| Error::not_found("session", id))?;
            print_session(session);
            for eq_id in &session.equipment_ids {
                match ledger.find_equipment(*eq_id) {
                    Some(item) => println!("  → {} ({})", item.name, item.model),
                    None => println!("  → equipment #{} (unknown)", eq_id),
                }
            }
        }
    }
    Ok(())
}

fn cmd_report(ctx: &Context, cmd: ReportCommand) -> Result<()> {
    let ledger = ctx.read()?;
    match cmd {
        ReportCommand::Csv { path } => {
            let count = write_sessions_csv(&path, &ledger, ledger.sessions())?;
            println!("✓ Wrote {} sessions to CSV", count);
            println!("  CSV: {}", path.display());
        }
        ReportCommand::Summary => {
            let summary = revenue_summary(&ledger);
            println!("Planned:     {}", summary.planned);
            println!("In progress: {}", summary.in_progress);
            println!("Completed:   {}", summary.completed);
            println!("Cancelled:   {}", summary.cancelled);
            println!();
            println!("Earned:    {}", summary.earned);
            println!("Booked:    {}", summary.booked);
            println!("Cancelled: {}", summary.cancelled_value);
        }
    }
    Ok(())
}

fn print_client(client: &Client) {
    println!(
        "Client #{}: {} | Phone: {} | Sessions: {}",
        client.id,
        client.contact.full_name(),
        client.contact.phone,
        client.sessions_count
    );
}

fn print_staff(staff: &Staff) {
    println!(
        "Photographer #{}: {} | {} | {}/h | {} years",
        staff.id,
        staff.contact.full_name(),
        staff.specialization,
        staff.hourly_rate,
        staff.experience_years
    );
}

fn print_equipment(item: &Equipment) {
    let availability = if item.available { "available" } else { "reserved" };
    println!(
        "Equipment #{}: {} [{}] ({}) | {}/h | {} | {}",
        item.id, item.name, item.category, item.model, item.rental_price, item.condition, availability
    );
}

fn print_session(session: &Session) {
    println!(
        "Session #{}: {} | {} | {} h | {} | client #{} | staff #{} | cost {}",
        session.id,
        session.session_type,
        session.scheduled_at.format("%Y-%m-%d %H:%M"),
        session.duration_hours,
        session.status,
        session.client_id,
        session.staff_id,
        session.total_cost
    );
}
