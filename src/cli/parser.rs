use clap::{Parser, Subcommand};

/// Command-line interface definition for rBooker
/// CLI application to coordinate community activity sessions with SQLite
#[derive(Parser)]
#[command(
    name = "rbooker",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple community activity CLI: schedule sessions, book seats, notify people using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(
            long = "reconcile",
            help = "Sweep seat counters against live bookings (source of truth)"
        )]
        reconcile: bool,

        #[arg(
            long = "fix",
            requires = "reconcile",
            help = "Repair drifted seat counters found by --reconcile"
        )]
        fix: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Schedule a new session
    Add {
        /// Session title
        title: String,

        /// Session date (YYYY-MM-DD)
        #[arg(long = "date")]
        date: String,

        /// Start time (HH:MM)
        #[arg(long = "from")]
        start: String,

        /// End time (HH:MM)
        #[arg(long = "to")]
        end: String,

        /// Venue name
        #[arg(long = "place", default_value = "")]
        place: String,

        /// Venue latitude (as supplied by the geocoding collaborator)
        #[arg(long)]
        lat: Option<f64>,

        /// Venue longitude
        #[arg(long)]
        lon: Option<f64>,

        /// Category: sports, creative, music, social, education, outdoor
        #[arg(long = "category")]
        category: Option<String>,

        /// Cadence label: once, weekly, biweekly, monthly
        #[arg(long = "cadence")]
        cadence: Option<String>,

        /// Attendee seats (omit to not offer the role)
        #[arg(long = "attendees")]
        attendees: Option<u32>,

        /// Volunteer seats (omit to not offer the role)
        #[arg(long = "volunteers")]
        volunteers: Option<u32>,

        /// Venue is wheelchair accessible
        #[arg(long = "accessible")]
        accessible: bool,

        /// Participation fee in cents (implies payment needed)
        #[arg(long = "fee")]
        fee: Option<i64>,

        /// Contact staff member (email)
        #[arg(long = "contact")]
        contact: Option<String>,
    },

    /// Edit an existing session (partial update)
    Edit {
        /// Session id
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long = "date")]
        date: Option<String>,

        #[arg(long = "from")]
        start: Option<String>,

        #[arg(long = "to")]
        end: Option<String>,

        #[arg(long = "place")]
        place: Option<String>,

        #[arg(long)]
        lat: Option<f64>,

        #[arg(long)]
        lon: Option<f64>,

        #[arg(long = "category")]
        category: Option<String>,

        #[arg(long = "cadence")]
        cadence: Option<String>,

        /// New attendee capacity (0 withdraws the role)
        #[arg(long = "attendees")]
        attendees: Option<u32>,

        /// New volunteer capacity (0 withdraws the role)
        #[arg(long = "volunteers")]
        volunteers: Option<u32>,

        #[arg(long = "accessible", conflicts_with = "not_accessible")]
        accessible: bool,

        #[arg(long = "not-accessible")]
        not_accessible: bool,

        #[arg(long = "fee")]
        fee: Option<i64>,

        #[arg(long = "contact")]
        contact: Option<String>,

        /// Record a staff member as present (email)
        #[arg(long = "staff")]
        staff: Option<String>,

        /// Remove a present staff member (email)
        #[arg(long = "unstaff")]
        unstaff: Option<String>,
    },

    /// Delete a session
    Del {
        /// Session id
        id: String,

        #[arg(
            long = "cascade",
            help = "Also delete every booking referencing the session"
        )]
        cascade: bool,

        #[arg(long = "yes", short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Move the featured highlight to a session (or clear it)
    Feature {
        /// Session id
        id: String,

        #[arg(long = "clear", help = "Clear the flag instead of setting it")]
        clear: bool,
    },

    /// List sessions
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "category")]
        category: Option<String>,

        #[arg(long = "role", help = "Only sessions offering this role")]
        role: Option<String>,

        #[arg(long = "featured", help = "Only the featured session")]
        featured: bool,

        #[arg(long = "json", help = "Emit the listing as JSON")]
        json: bool,
    },

    /// Register a person for a session
    Register {
        /// Session id
        session: String,

        /// Person email (must exist in the people projection)
        #[arg(long = "email")]
        email: String,

        /// Role to play: attendee (default) or volunteer
        #[arg(long = "as", value_name = "ROLE")]
        role: Option<String>,

        /// Membership preference: drop-in, member, trial
        #[arg(long = "membership")]
        membership: Option<String>,

        /// Payment still needed for this booking
        #[arg(long = "pay")]
        pay: bool,

        /// Free-text note
        #[arg(long = "note", default_value = "")]
        note: String,
    },

    /// Cancel a booking
    Unregister {
        /// Session id
        session: String,

        #[arg(long = "email")]
        email: String,

        #[arg(long = "as", value_name = "ROLE")]
        role: Option<String>,
    },

    /// List bookings by session or by person
    Bookings {
        #[arg(long = "session")]
        session: Option<String>,

        #[arg(long = "email")]
        email: Option<String>,

        #[arg(long = "json", help = "Emit the listing as JSON")]
        json: bool,
    },

    /// Mark a booking as attended (staff action, after the fact)
    Attend {
        /// Booking id
        booking: String,

        #[arg(long = "undo", help = "Revoke the attended flag instead")]
        undo: bool,
    },

    /// Manage the people projection (identity collaborator stand-in)
    Person {
        /// Add or update a person by email
        #[arg(long = "add", value_name = "EMAIL")]
        add: Option<String>,

        #[arg(long = "name")]
        name: Option<String>,

        /// participant, volunteer or staff
        #[arg(long = "role")]
        role: Option<String>,

        /// unrestricted, no-long-walks or no-walking
        #[arg(long = "mobility")]
        mobility: Option<String>,

        #[arg(long)]
        lat: Option<f64>,

        #[arg(long)]
        lon: Option<f64>,

        #[arg(long = "tags", help = "Comma-separated preference tags")]
        tags: Option<String>,

        #[arg(long = "onboarded")]
        onboarded: bool,

        #[arg(long = "list", help = "List all known people")]
        list: bool,
    },

    /// Create a notification
    Notify {
        /// Notification title
        title: String,

        #[arg(long = "body", default_value = "")]
        body: String,

        /// reminder, signup-request or announcement
        #[arg(long = "kind")]
        kind: Option<String>,

        /// all, participants, volunteers or experienced-volunteers
        #[arg(long = "audience")]
        audience: Option<String>,

        /// Linked session id
        #[arg(long = "session")]
        session: Option<String>,

        /// Expiry timestamp (YYYY-MM-DD HH:MM), strictly in the future
        #[arg(long = "expires")]
        expires: Option<String>,

        /// Creating staff member (email)
        #[arg(long = "by")]
        by: String,
    },

    /// Inbox operations: list, mark read, delete
    Notices {
        /// Recipient email for listing / marking read
        #[arg(long = "for", value_name = "EMAIL")]
        recipient: Option<String>,

        #[arg(long = "all", help = "Include expired notifications in the listing")]
        all: bool,

        /// Mark a notification as read (requires --for)
        #[arg(long = "read", value_name = "ID", requires = "recipient")]
        read: Option<String>,

        /// Delete a notification (staff action)
        #[arg(long = "del", value_name = "ID")]
        del: Option<String>,

        #[arg(long = "json", help = "Emit the listing as JSON")]
        json: bool,
    },

    /// Preview the recipients of an audience selector
    Audience {
        /// all, participants, volunteers or experienced-volunteers
        selector: String,

        #[arg(long = "count", help = "Print only the recipient count")]
        count: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}
