// Copyright (c) 2025 - Cowboy AI, Inc.
//! CloudFormation rendering
//!
//! Turns a [`ResourceGraph`] into a CloudFormation JSON template, for
//! operators who deploy through CloudFormation rather than through a
//! [`Provisioner`](crate::provision::Provisioner).
//!
//! Zone lookups have no CloudFormation resource; each one becomes a
//! `AWS::Route53::HostedZone::Id` parameter named `{node id}Id`.

use serde_json::{json, Map, Value};

use crate::graph::{
    Attribute, Binding, CertificateValidation, ResourceGraph, ResourceKind, ResourceNode,
    ResourceSpec,
};

pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// Hosted zone id CloudFront alias targets always live in
pub const CLOUDFRONT_HOSTED_ZONE_ID: &str = "Z2FDTNDATAQYW2";

/// Managed "CachingOptimized" cache policy
pub const CACHING_OPTIMIZED_POLICY_ID: &str = "658327ea-f89d-4fab-a63d-7e88639e58f6";

const S3_ORIGIN_ID: &str = "S3Origin";

/// Render `graph` as a CloudFormation template
pub fn render_template(graph: &ResourceGraph, description: &str) -> Value {
    let mut parameters = Map::new();
    let mut resources = Map::new();
    let mut outputs = Map::new();

    for node in graph.topological_order() {
        match &node.spec {
            ResourceSpec::HostedZoneLookup { domain_name } => {
                parameters.insert(
                    zone_parameter(node),
                    json!({
                        "Type": "AWS::Route53::HostedZone::Id",
                        "Description": format!("Existing hosted zone for {domain_name}"),
                    }),
                );
            }
            ResourceSpec::Output {
                name,
                description,
                value,
            } => {
                outputs.insert(
                    name.clone(),
                    json!({
                        "Description": description,
                        "Value": render_binding(graph, value),
                    }),
                );
            }
            spec => {
                resources.insert(node.id.to_string(), render_resource(graph, node, spec));
            }
        }
    }

    json!({
        "AWSTemplateFormatVersion": TEMPLATE_FORMAT_VERSION,
        "Description": description,
        "Parameters": parameters,
        "Resources": resources,
        "Outputs": outputs,
    })
}

fn zone_parameter(node: &ResourceNode) -> String {
    format!("{}Id", node.id)
}

fn render_resource(graph: &ResourceGraph, node: &ResourceNode, spec: &ResourceSpec) -> Value {
    let b = |binding: &Binding| render_binding(graph, binding);

    match spec {
        ResourceSpec::OriginAccessIdentity { comment } => json!({
            "Type": "AWS::CloudFront::CloudFrontOriginAccessIdentity",
            "Properties": {
                "CloudFrontOriginAccessIdentityConfig": { "Comment": comment },
            },
        }),
        ResourceSpec::Bucket {
            bucket_name,
            block_public_access,
            website_index_document,
        } => json!({
            "Type": "AWS::S3::Bucket",
            "Properties": {
                "BucketName": bucket_name,
                "PublicAccessBlockConfiguration": {
                    "BlockPublicAcls": block_public_access,
                    "BlockPublicPolicy": block_public_access,
                    "IgnorePublicAcls": block_public_access,
                    "RestrictPublicBuckets": block_public_access,
                },
                "WebsiteConfiguration": { "IndexDocument": website_index_document },
            },
        }),
        ResourceSpec::BucketPolicy {
            bucket,
            principal_canonical_user,
            actions,
            bucket_arn,
        } => json!({
            "Type": "AWS::S3::BucketPolicy",
            "Properties": {
                "Bucket": b(bucket),
                "PolicyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Effect": "Allow",
                        "Action": actions,
                        "Resource": { "Fn::Join": ["", [b(bucket_arn), "/*"]] },
                        "Principal": { "CanonicalUser": b(principal_canonical_user) },
                    }],
                },
            },
        }),
        ResourceSpec::Certificate {
            domain_name,
            subject_alternative_names,
            validation: CertificateValidation::Dns { hosted_zone_id },
        } => {
            let zone = b(hosted_zone_id);
            let validation_options: Vec<Value> = std::iter::once(domain_name)
                .chain(subject_alternative_names)
                .map(|domain| json!({ "DomainName": domain, "HostedZoneId": zone }))
                .collect();
            let mut properties = json!({
                "DomainName": domain_name,
                "ValidationMethod": "DNS",
                "DomainValidationOptions": validation_options,
            });
            if !subject_alternative_names.is_empty() {
                properties["SubjectAlternativeNames"] = json!(subject_alternative_names);
            }
            json!({
                "Type": "AWS::CertificateManager::Certificate",
                "Properties": properties,
            })
        }
        ResourceSpec::Distribution {
            aliases,
            certificate_arn,
            origin_domain_name,
            origin_access_identity,
            viewer_protocol_policy,
            default_root_object,
            error_responses,
            minimum_protocol_version,
            ssl_support_method,
        } => {
            let error_responses: Vec<Value> = error_responses
                .iter()
                .map(|r| {
                    json!({
                        "ErrorCode": r.error_code,
                        "ResponseCode": r.response_code,
                        "ResponsePagePath": r.response_page_path,
                        "ErrorCachingMinTTL": r.error_caching_min_ttl,
                    })
                })
                .collect();
            json!({
                "Type": "AWS::CloudFront::Distribution",
                "Properties": {
                    "DistributionConfig": {
                        "Enabled": true,
                        "Aliases": aliases,
                        "DefaultRootObject": default_root_object,
                        "ViewerCertificate": {
                            "AcmCertificateArn": b(certificate_arn),
                            "MinimumProtocolVersion": minimum_protocol_version,
                            "SslSupportMethod": ssl_support_method.as_str(),
                        },
                        "Origins": [{
                            "Id": S3_ORIGIN_ID,
                            "DomainName": b(origin_domain_name),
                            "S3OriginConfig": {
                                "OriginAccessIdentity": {
                                    "Fn::Join": ["", [
                                        "origin-access-identity/cloudfront/",
                                        b(origin_access_identity),
                                    ]],
                                },
                            },
                        }],
                        "DefaultCacheBehavior": {
                            "TargetOriginId": S3_ORIGIN_ID,
                            "ViewerProtocolPolicy": viewer_protocol_policy.as_str(),
                            "CachePolicyId": CACHING_OPTIMIZED_POLICY_ID,
                        },
                        "CustomErrorResponses": error_responses,
                    },
                },
            })
        }
        ResourceSpec::AliasRecord {
            record_name,
            hosted_zone_id,
            target_domain_name,
        } => json!({
            "Type": "AWS::Route53::RecordSet",
            "Properties": {
                "HostedZoneId": b(hosted_zone_id),
                "Name": record_name,
                "Type": "A",
                "AliasTarget": {
                    "DNSName": b(target_domain_name),
                    "HostedZoneId": CLOUDFRONT_HOSTED_ZONE_ID,
                },
            },
        }),
        // Handled by render_template
        ResourceSpec::HostedZoneLookup { .. } | ResourceSpec::Output { .. } => {
            json!({ "Type": format!("Custom::{}", node.kind()) })
        }
    }
}

/// `Ref` / `Fn::GetAtt` for a binding
fn render_binding(graph: &ResourceGraph, binding: &Binding) -> Value {
    let reference = match binding {
        Binding::Literal(value) => return json!(value),
        Binding::Ref(reference) => reference,
    };

    let id = reference.resource.as_str();
    let target = graph.get(&reference.resource);

    if let Some(node) = target.filter(|n| n.kind() == ResourceKind::HostedZoneLookup) {
        return json!({ "Ref": zone_parameter(node) });
    }

    match reference.attribute {
        Attribute::HostedZoneId
        | Attribute::OriginAccessIdentityId
        | Attribute::BucketName
        | Attribute::CertificateArn
        | Attribute::DistributionId
        | Attribute::RecordName => json!({ "Ref": id }),
        Attribute::CanonicalUserId => json!({ "Fn::GetAtt": [id, "S3CanonicalUserId"] }),
        Attribute::BucketArn => json!({ "Fn::GetAtt": [id, "Arn"] }),
        Attribute::BucketRegionalDomainName => {
            json!({ "Fn::GetAtt": [id, "RegionalDomainName"] })
        }
        Attribute::DistributionDomainName => json!({ "Fn::GetAtt": [id, "DomainName"] }),
        Attribute::OutputValue => json!({ "Fn::GetAtt": [id, "Value"] }),
    }
}
