use hosta_core::Role;

/// Every menu the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Admin,
    AdminRooms,
    AdminCleaners,
    AdminRules,
    AdminReservation,
    Client,
    Cleaner,
}

/// What selecting a menu entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Login,
    Register,
    ChangeDate,
    Exit,
    Open(Screen),
    Back,
    Logout,
    AddRoom,
    RemoveRoom,
    SetRoomStatus,
    ListRooms,
    HireCleaner,
    FireCleaner,
    ListCleaners,
    SetCheckIn,
    SetCheckOut,
    ClientReservations,
    AdminCancel,
    AdminChangePeriod,
    AdminForceCheckIn,
    DeleteClient,
    FreeRooms,
    Book,
    SelfCheckIn,
    SelfCheckOut,
    History,
    Cancel,
    DeleteAccount,
    DirtyRooms,
    CleanRoom,
}

impl Screen {
    /// Top-level menu for an authenticated role.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Administrator => Screen::Admin,
            Role::Client => Screen::Client,
            Role::Cleaner => Screen::Cleaner,
        }
    }

    /// Menu shown when Esc is pressed, if any.
    pub fn parent(&self) -> Option<Screen> {
        match self {
            Screen::AdminRooms
            | Screen::AdminCleaners
            | Screen::AdminRules
            | Screen::AdminReservation => Some(Screen::Admin),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Main => "MAIN MENU",
            Screen::Admin => "ADMIN PANEL",
            Screen::AdminRooms => "ROOMS",
            Screen::AdminCleaners => "CLEANERS",
            Screen::AdminRules => "CHECK-IN / CHECK-OUT RULES",
            Screen::AdminReservation => "MANAGE A RESERVATION",
            Screen::Client => "CLIENT",
            Screen::Cleaner => "CLEANER",
        }
    }

    pub fn items(&self) -> &'static [(&'static str, MenuAction)] {
        match self {
            Screen::Main => &[
                ("Login", MenuAction::Login),
                ("Register", MenuAction::Register),
                ("Change hotel date (simulation)", MenuAction::ChangeDate),
                ("Exit", MenuAction::Exit),
            ],
            Screen::Admin => &[
                ("Rooms (add / remove / status)", MenuAction::Open(Screen::AdminRooms)),
                ("Cleaners (hire / fire)", MenuAction::Open(Screen::AdminCleaners)),
                ("Rules (check-in / check-out time)", MenuAction::Open(Screen::AdminRules)),
                ("Client reservations", MenuAction::ClientReservations),
                ("Manage a reservation", MenuAction::Open(Screen::AdminReservation)),
                ("Delete client account", MenuAction::DeleteClient),
                ("Logout", MenuAction::Logout),
            ],
            Screen::AdminRooms => &[
                ("Add room", MenuAction::AddRoom),
                ("Remove room", MenuAction::RemoveRoom),
                ("Change status", MenuAction::SetRoomStatus),
                ("List rooms", MenuAction::ListRooms),
                ("Back", MenuAction::Back),
            ],
            Screen::AdminCleaners => &[
                ("Hire cleaner", MenuAction::HireCleaner),
                ("Fire cleaner", MenuAction::FireCleaner),
                ("List cleaners", MenuAction::ListCleaners),
                ("Back", MenuAction::Back),
            ],
            Screen::AdminRules => &[
                ("Set check-in start", MenuAction::SetCheckIn),
                ("Set check-out limit", MenuAction::SetCheckOut),
                ("Back", MenuAction::Back),
            ],
            Screen::AdminReservation => &[
                ("Cancel reservation", MenuAction::AdminCancel),
                ("Change period", MenuAction::AdminChangePeriod),
                ("Force check-in", MenuAction::AdminForceCheckIn),
                ("Back", MenuAction::Back),
            ],
            Screen::Client => &[
                ("Search free rooms", MenuAction::FreeRooms),
                ("Book a room", MenuAction::Book),
                ("Self check-in", MenuAction::SelfCheckIn),
                ("Self check-out", MenuAction::SelfCheckOut),
                ("My reservations / history", MenuAction::History),
                ("Cancel a reservation", MenuAction::Cancel),
                ("Logout", MenuAction::Logout),
                ("Delete my account", MenuAction::DeleteAccount),
            ],
            Screen::Cleaner => &[
                ("Rooms to clean", MenuAction::DirtyRooms),
                ("Mark room cleaned", MenuAction::CleanRoom),
                ("Logout", MenuAction::Logout),
            ],
        }
    }
}
