mod report_dto;

pub use report_dto::{
    AssignReportDto, CreateReportDto, ReportDetailDto, ReportFilter, ReportListQuery,
    ReportResponseDto, ReportStatsDto, UpdateReportDto, UpdateReportStatusDto,
};
