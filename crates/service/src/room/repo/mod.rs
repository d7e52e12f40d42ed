pub mod seaorm;

pub use seaorm::SeaOrmRoomRepository;
