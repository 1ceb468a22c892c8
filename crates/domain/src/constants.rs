//! Protocol constants
//!
//! Fixed values of the PlayStation Network private API. These describe an
//! external protocol and are not meant to be tuned.

// Account / token endpoints
pub const TOKEN_URL: &str = "https://ca.account.sony.com/api/authz/v3/oauth/token";
pub const SSO_COOKIE_URL: &str = "https://ca.account.sony.com/api/v1/ssocookie";
pub const TOKEN_SCOPE: &str = "psn:mobile.v2.core psn:clientapp";
pub const TOKEN_FORMAT: &str = "jwt";
pub const GRANT_SESSION_EXCHANGE: &str = "sso_token";
pub const GRANT_REFRESH: &str = "refresh_token";
pub const ACCESS_TYPE_OFFLINE: &str = "offline";

// Service base URLs
pub const PROFILE_BASE_URL: &str = "https://us-prof.np.community.playstation.net/userProfile";
pub const SEARCH_BASE_URL: &str = "https://m.np.playstation.com/api/search";
pub const MESSAGING_BASE_URL: &str = "https://m.np.playstation.com/api/gamingLoungeGroups";

/// Field list requested for profile and friend lookups.
pub const PROFILE_FIELDS: &str = "npId,onlineId,accountId,avatarUrls,plus,aboutMe,languagesUsed,trophySummary(@default,level,progress,earnedTrophies),isOfficiallyVerified,personalDetail(@default,profilePictureUrls),personalDetailSharing,personalDetailSharingRequestMessageFlag,primaryOnlineStatus,presences(@default,@titleInfo,platform,lastOnlineDate,hasBroadcastData),requestMessageFlag,blocking,friendRelation,following,consoleAvailability";

/// Query string used when listing the caller's groups.
pub const GROUP_LIST_QUERY: &str = "favoriteFilter=notFavorite&includeFields=groupName,groupIcon,members,mainThread,joinedTimestamp,modifiedTimestamp,totalGroupCount,isFavorite,existsNewArrival,partySessions&limit=200";

pub const DEFAULT_SEARCH_DOMAIN: &str = "SocialAllAccounts";
pub const MESSAGING_LANGUAGE: &str = "en-US";

// Content types
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_JSON_UTF8: &str = "application/json; charset=utf-8";
/// Upload body type and fallback type for downloads.
pub const CONTENT_TYPE_IMAGE: &str = "image/jpeg";

// Message type discriminators
pub const MESSAGE_TYPE_TEXT: u32 = 1;
pub const MESSAGE_TYPE_IMAGE: u32 = 3;
pub const MESSAGE_TYPE_STICKER: u32 = 1013;

// Preset sticker manifest
pub const STICKER_MANIFEST_URL: &str = "https://psn-rsc.prod.dl.playstation.net/psn-rsc/sticker/preset/PRESET0000000002_514DB3A4FB993D12EBF3/manifest.json";
pub const STICKER_NUMBER: &str = "03";
pub const STICKER_PACKAGE_ID: &str = "PRESET0000000002";
pub const STICKER_TYPE: &str = "preset";

// Local defaults
pub const DEFAULT_TOKEN_STORE_PATH: &str = "data/psn_tokens.json";
pub const DEFAULT_RESOURCE_DIR: &str = "data/psnapi/resources";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CORS_ORIGIN: &str = "*";
