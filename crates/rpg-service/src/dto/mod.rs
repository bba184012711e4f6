//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs
//! - Lenient id parsing shared by REST bodies and socket events

pub mod ids;
pub mod mappers;
pub mod requests;
pub mod responses;

pub use ids::id_from_value;

pub use requests::{
    AcceptJoinRequest, CreateCampaignRequest, CreateNotificationRequest, CreateRoomRequest,
    IdRequest, JoinCampaignRequest, LoginRequest, NextSessionRequest, OptionalIdRequest,
    PostMessageRequest, PromoteRequest, RefreshTokenRequest, RegisterRequest,
    UpdateCampaignRequest,
};

pub use responses::{
    AcceptJoinResponse, CampaignDetailResponse, CampaignEnvelope, CampaignMemberResponse,
    CampaignResponse, CampaignSummaryResponse, CampaignUserResponse, ChatMessageResponse,
    ChatRoomResponse, CreateCampaignResponse, CreateNotificationResponse, CreateRoomResponse,
    FindUserResponse, HealthChecks, HealthResponse, JoinCampaignResponse, JoinRequestResponse,
    LoginResponse, MembershipResponse, MessageResponse, NotificationResponse,
    ParticipantResponse, ProfileResponse, PromoteResponse, ReadinessResponse, RefreshResponse, RegisterResponse,
    RoomListResponse, RowsResponse, SessionUserResponse, UserCampaignDetailResponse,
    UserCampaignDetailsResponse, UserResponse,
};
